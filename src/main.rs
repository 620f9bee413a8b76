mod config;
mod logging;
mod scheduler;
mod sync;
mod utils;

use anyhow::Context;
use clap::Parser;
use config::SettingsFile;
use logging::LogFileSink;
use scheduler::ShutdownSignal;
use std::path::PathBuf;
use std::sync::Arc;
use sync::EventSink;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Mirror Daemon - keeps a replica directory tree identical to a source tree
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory tree to mirror from
    #[arg(short, long, env = "MIRROR_DAEMON_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Directory tree kept identical to the source
    #[arg(short, long, env = "MIRROR_DAEMON_REPLICA_DIR")]
    replica_dir: Option<PathBuf>,

    /// Seconds between synchronization passes
    #[arg(
        short,
        long,
        env = "MIRROR_DAEMON_INTERVAL_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval_secs: Option<u64>,

    /// File that receives one timestamped line per synchronization event
    #[arg(short, long, env = "MIRROR_DAEMON_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// JSON settings file; command-line and environment values take precedence
    #[arg(short, long, env = "MIRROR_DAEMON_CONFIG")]
    config: Option<PathBuf>,

    /// Run a single pass and exit instead of scheduling
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse CLI arguments
    let args = Args::parse();

    let file_settings = match &args.config {
        Some(path) => Some(
            config::read_settings_file(path)
                .await
                .with_context(|| format!("failed to read settings file {}", path.display()))?,
        ),
        None => None,
    };

    let overrides = SettingsFile {
        source_dir: args.source_dir,
        replica_dir: args.replica_dir,
        interval_secs: args.interval_secs,
        log_file: args.log_file,
    };
    let settings = config::resolve_settings(overrides, file_settings)?;

    // Both roots must exist before periodic execution may start
    anyhow::ensure!(
        settings.source_dir.is_dir(),
        "source directory does not exist: {}",
        settings.source_dir.display()
    );
    anyhow::ensure!(
        settings.replica_dir.is_dir(),
        "replica directory does not exist: {}",
        settings.replica_dir.display()
    );

    let sink: Arc<dyn EventSink> = Arc::new(LogFileSink::new(settings.log_file.clone()));

    if args.once {
        let ok = scheduler::run_once(&settings, sink.as_ref()).await;
        anyhow::ensure!(ok, "synchronization pass failed");
        return Ok(());
    }

    // Stop on Ctrl-C, finishing the pass in flight first
    let (shutdown_tx, shutdown_rx) = watch::channel(ShutdownSignal::None);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl-C, stopping after the current pass");
            let _ = shutdown_tx.send(ShutdownSignal::Shutdown);
        }
    });

    info!(
        "Mirroring {} to {} every {}s (log: {})",
        settings.source_dir.display(),
        settings.replica_dir.display(),
        settings.interval_secs,
        settings.log_file.display()
    );

    scheduler::run(settings, sink, shutdown_rx).await;

    info!("Mirror daemon stopped");
    Ok(())
}
