use crate::domain::config::LogsConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const SERVER_LOG_FILE: &str = "server.log";
pub const APP_LOG_FILE: &str = "app.log";

/// Locations of the runtime's log files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogPaths {
    pub server_log: PathBuf,
    pub app_log: PathBuf,
}

impl LogPaths {
    /// Resolve from configuration, falling back to the platform data directory
    pub fn resolve(config: &LogsConfig) -> Self {
        let dir = config.dir.clone().unwrap_or_else(default_log_dir);
        Self::in_dir(&dir)
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self {
            server_log: dir.join(SERVER_LOG_FILE),
            app_log: dir.join(APP_LOG_FILE),
        }
    }
}

/// `<data_local_dir>/llmctl/logs`, or `~/.llmctl/logs` when the platform has
/// no data directory.
pub fn default_log_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data) => data.join("llmctl").join("logs"),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".llmctl")
            .join("logs"),
    }
}
