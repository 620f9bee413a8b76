use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("interval must be at least one second")]
    ZeroInterval,
}

/// Values the daemon runs with, fixed once at startup
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Directory tree being mirrored from
    pub source_dir: PathBuf,
    /// Directory tree kept identical to the source
    pub replica_dir: PathBuf,
    /// Delay between passes, in whole seconds. Always at least 1.
    pub interval_secs: u64,
    /// File that receives one timestamped line per synchronization event
    pub log_file: PathBuf,
}

impl SyncSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// Settings-file contents; any subset of the four values may be present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsFile {
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    #[serde(default)]
    pub replica_dir: Option<PathBuf>,
    #[serde(default)]
    pub interval_secs: Option<u64>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Read a settings file. The file must exist once a path was given.
pub async fn read_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let content = fs::read_to_string(path).await?;
    let settings: SettingsFile = serde_json::from_str(&content)?;
    Ok(settings)
}

/// Resolve effective settings: command-line values win over file values,
/// field by field. All four values must end up present.
pub fn resolve_settings(
    overrides: SettingsFile,
    file: Option<SettingsFile>,
) -> Result<SyncSettings, ConfigError> {
    let file = file.unwrap_or_default();

    let source_dir = overrides
        .source_dir
        .or(file.source_dir)
        .ok_or(ConfigError::MissingSetting("sourceDir"))?;
    let replica_dir = overrides
        .replica_dir
        .or(file.replica_dir)
        .ok_or(ConfigError::MissingSetting("replicaDir"))?;
    let interval_secs = overrides
        .interval_secs
        .or(file.interval_secs)
        .ok_or(ConfigError::MissingSetting("intervalSecs"))?;
    let log_file = overrides
        .log_file
        .or(file.log_file)
        .ok_or(ConfigError::MissingSetting("logFile"))?;

    if interval_secs == 0 {
        return Err(ConfigError::ZeroInterval);
    }

    Ok(SyncSettings {
        source_dir,
        replica_dir,
        interval_secs,
        log_file,
    })
}
