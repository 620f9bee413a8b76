#![allow(dead_code)]

use async_trait::async_trait;
use mirror_daemon::{EventSink, SyncEvent};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Creates a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Should create temp directory")
}

/// Sink that records every emitted event in memory
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SyncEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SyncEvent> {
        self.events.lock().expect("Should lock events").clone()
    }

    pub fn count(&self, predicate: fn(&SyncEvent) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: SyncEvent) {
        self.events.lock().expect("Should lock events").push(event);
    }
}

/// Write a file, creating any missing parent directories
pub fn write_file(path: &Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Should create parent directories");
    }
    std::fs::write(path, contents).expect("Should write file");
}

pub fn read_file(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("Should read file")
}
