use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

/// One observable action taken during a pass, or the failure that ended it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A missing containing directory was created in the replica
    DirectoryCreated(PathBuf),
    /// A source file was copied over its replica counterpart
    FileCopied { source: PathBuf, dest: PathBuf },
    /// A replica file with no source counterpart was removed
    FileDeleted(PathBuf),
    /// A replica directory with no source counterpart was removed
    DirectoryDeleted(PathBuf),
    /// A pass finished without error
    Completed,
    /// A pass aborted early
    Error(String),
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncEvent::DirectoryCreated(path) => {
                write!(f, "Created directory: {}", path.display())
            }
            SyncEvent::FileCopied { source, dest } => {
                write!(f, "Copied file: {} to {}", source.display(), dest.display())
            }
            SyncEvent::FileDeleted(path) => write!(f, "Deleted file: {}", path.display()),
            SyncEvent::DirectoryDeleted(path) => {
                write!(f, "Deleted directory: {}", path.display())
            }
            SyncEvent::Completed => write!(f, "Synchronization complete."),
            SyncEvent::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Destination for the events a pass emits.
///
/// The sink owns persistence and formatting; `emit` never fails from the
/// caller's point of view.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: SyncEvent);
}
