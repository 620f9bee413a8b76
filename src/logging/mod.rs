use crate::sync::{EventSink, SyncEvent};
use crate::utils::now_local;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

/// Sink that appends one timestamped line per event to the log file and
/// mirrors every event to the console.
///
/// Persistence is this sink's own concern: a failed append is logged as a
/// warning and swallowed so the pass in flight is never disturbed.
pub struct LogFileSink {
    path: PathBuf,
}

impl LogFileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await
    }
}

#[async_trait]
impl EventSink for LogFileSink {
    async fn emit(&self, event: SyncEvent) {
        match &event {
            SyncEvent::Error(_) => error!("{}", event),
            _ => info!("{}", event),
        }

        let line = format!("{}: {}\n", now_local(), event);
        if let Err(err) = self.append_line(&line).await {
            warn!("failed to append to {}: {}", self.path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_append_to_log_file() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let log_path = dir.path().join("sync.log");
        let sink = LogFileSink::new(log_path.clone());

        sink.emit(SyncEvent::FileDeleted("/replica/old.txt".into()))
            .await;
        sink.emit(SyncEvent::Completed).await;

        let content = tokio::fs::read_to_string(&log_path)
            .await
            .expect("Should read log file");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Deleted file: /replica/old.txt"));
        assert!(lines[1].ends_with("Synchronization complete."));
    }

    #[tokio::test]
    async fn test_append_failure_does_not_panic() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        // A path whose parent is a regular file cannot be opened
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "x").await.expect("Should write file");
        let sink = LogFileSink::new(blocker.join("sync.log"));

        sink.emit(SyncEvent::Completed).await;
    }
}
