pub mod config;
pub mod logging;
pub mod scheduler;
pub mod sync;
pub mod utils;

// Re-export commonly used types
pub use config::{read_settings_file, resolve_settings, ConfigError, SettingsFile, SyncSettings};
pub use logging::LogFileSink;
pub use scheduler::ShutdownSignal;
pub use sync::{run_pass, EventSink, SyncError, SyncEvent, SyncReport};
