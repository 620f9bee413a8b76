use crate::utils::compute_file_hash;
use super::events::{EventSink, SyncEvent};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("walk failed: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("path {} is not under its root", .0.display())]
    RelativePath(PathBuf),
}

/// Actions applied by one pass, as paths relative to the roots
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub directories_created: Vec<PathBuf>,
    pub files_copied: Vec<PathBuf>,
    pub files_deleted: Vec<PathBuf>,
    pub directories_deleted: Vec<PathBuf>,
    /// Source files whose replica counterpart already matched
    pub files_unchanged: usize,
}

impl SyncReport {
    /// Check whether the pass changed anything in the replica
    pub fn is_noop(&self) -> bool {
        self.directories_created.is_empty()
            && self.files_copied.is_empty()
            && self.files_deleted.is_empty()
            && self.directories_deleted.is_empty()
    }
}

/// Run one full synchronization pass over the current on-disk state:
/// copy phase, then file deletion phase, then directory deletion phase.
///
/// Both roots must already exist; they are never created here. Any error
/// aborts the remainder of the pass and is returned as-is. Actions applied
/// before the error stay applied; the next pass repairs whatever is left,
/// since the algorithm is stateless and idempotent.
pub async fn run_pass(
    source_root: &Path,
    replica_root: &Path,
    sink: &dyn EventSink,
) -> Result<SyncReport, SyncError> {
    let mut report = SyncReport::default();

    copy_files(source_root, replica_root, sink, &mut report).await?;
    delete_stale_files(source_root, replica_root, sink, &mut report).await?;
    delete_stale_directories(source_root, replica_root, sink, &mut report).await?;

    sink.emit(SyncEvent::Completed).await;
    Ok(report)
}

/// Copy phase: bring every source file across, creating containing
/// directories as they are first needed
async fn copy_files(
    source_root: &Path,
    replica_root: &Path,
    sink: &dyn EventSink,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    for entry in WalkDir::new(source_root).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_to(entry.path(), source_root)?;
        let dest = replica_root.join(relative);

        if let Some(parent) = dest.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
                sink.emit(SyncEvent::DirectoryCreated(parent.to_path_buf()))
                    .await;
                if let Some(parent_rel) = relative.parent().filter(|p| !p.as_os_str().is_empty())
                {
                    report.directories_created.push(parent_rel.to_path_buf());
                }
            }
        }

        if file_matches(entry.path(), &dest).await? {
            report.files_unchanged += 1;
            continue;
        }

        fs::copy(entry.path(), &dest).await?;
        sink.emit(SyncEvent::FileCopied {
            source: entry.path().to_path_buf(),
            dest: dest.clone(),
        })
        .await;
        report.files_copied.push(relative.to_path_buf());
    }

    Ok(())
}

/// File deletion phase: remove every replica file whose relative path no
/// longer exists as a file in the source
async fn delete_stale_files(
    source_root: &Path,
    replica_root: &Path,
    sink: &dyn EventSink,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    for entry in WalkDir::new(replica_root).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_to(entry.path(), replica_root)?;
        if source_root.join(relative).is_file() {
            continue;
        }

        fs::remove_file(entry.path()).await?;
        sink.emit(SyncEvent::FileDeleted(entry.path().to_path_buf()))
            .await;
        report.files_deleted.push(relative.to_path_buf());
    }

    Ok(())
}

/// Directory deletion phase: remove every replica directory whose relative
/// path no longer exists as a directory in the source, subtrees included
async fn delete_stale_directories(
    source_root: &Path,
    replica_root: &Path,
    sink: &dyn EventSink,
    report: &mut SyncReport,
) -> Result<(), SyncError> {
    // The list is materialized up front: deleting while walking would make
    // the walker descend into directories that are already gone.
    let mut replica_dirs = Vec::new();
    for entry in WalkDir::new(replica_root).min_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            replica_dirs.push(entry.into_path());
        }
    }

    for dir in replica_dirs {
        let relative = relative_to(&dir, replica_root)?;
        if source_root.join(relative).is_dir() {
            continue;
        }

        match fs::remove_dir_all(&dir).await {
            Ok(()) => {
                sink.emit(SyncEvent::DirectoryDeleted(dir.clone())).await;
                report.directories_deleted.push(relative.to_path_buf());
            }
            // Already removed together with a deleted ancestor
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Check whether the replica file already holds the source file's content.
///
/// A missing replica file never matches. Sizes are compared first; equal
/// sizes fall through to a full-content fingerprint comparison, so the
/// copy/skip decision is exactly the fingerprint's. Both files are read
/// fully into memory to fingerprint.
async fn file_matches(source: &Path, dest: &Path) -> Result<bool, SyncError> {
    let dest_meta = match fs::metadata(dest).await {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err.into()),
    };

    let source_meta = fs::metadata(source).await?;
    if source_meta.len() != dest_meta.len() {
        return Ok(false);
    }

    Ok(compute_file_hash(source).await? == compute_file_hash(dest).await?)
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> Result<&'a Path, SyncError> {
    path.strip_prefix(root)
        .map_err(|_| SyncError::RelativePath(path.to_path_buf()))
}
