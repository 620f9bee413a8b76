use crate::config::SyncSettings;
use crate::sync::{self, EventSink, SyncEvent};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Control message for the scheduling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    None,
    Shutdown,
}

/// Drive synchronization passes at the configured interval until shutdown.
///
/// Passes never overlap: the current pass is awaited before the next tick
/// is taken, and ticks that would have fired in the meantime are skipped.
/// The first tick fires immediately, so the first pass runs at startup.
pub async fn run(
    settings: SyncSettings,
    sink: Arc<dyn EventSink>,
    mut shutdown_rx: watch::Receiver<ShutdownSignal>,
) {
    let mut ticker = interval(settings.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                run_once(&settings, sink.as_ref()).await;
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() == ShutdownSignal::Shutdown {
                    info!("Scheduler stopping");
                    break;
                }
            }
        }
    }
}

/// Run a single pass, reporting a failure to the sink as a pass error.
/// Returns whether the pass completed without error.
pub async fn run_once(settings: &SyncSettings, sink: &dyn EventSink) -> bool {
    match sync::run_pass(&settings.source_dir, &settings.replica_dir, sink).await {
        Ok(report) => {
            if report.is_noop() {
                info!(
                    "Pass finished: replica already up to date, {} files unchanged",
                    report.files_unchanged
                );
            } else {
                info!(
                    "Pass finished: {} copied, {} deleted, {} directories created, {} directories removed, {} unchanged",
                    report.files_copied.len(),
                    report.files_deleted.len(),
                    report.directories_created.len(),
                    report.directories_deleted.len(),
                    report.files_unchanged
                );
            }
            true
        }
        Err(err) => {
            sink.emit(SyncEvent::Error(err.to_string())).await;
            false
        }
    }
}
