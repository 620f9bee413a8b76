mod events;
mod pass;

pub use events::{EventSink, SyncEvent};
pub use pass::{run_pass, SyncError, SyncReport};
