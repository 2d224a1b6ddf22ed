use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// llmctl configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmCtlConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Log viewing configuration
    #[serde(default)]
    pub logs: LogsConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Settings for the `logs` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    /// Directory holding server.log and app.log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Follow poll interval in milliseconds
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Lines shown when --tail is not given (0 = all)
    #[serde(default)]
    pub default_tail: usize,
}

impl LogsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_poll_interval() -> u64 {
    100
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            poll_interval_ms: default_poll_interval(),
            default_tail: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = LlmCtlConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: LlmCtlConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.global.log_level, "info");
        assert_eq!(deserialized.logs.poll_interval_ms, 100);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LlmCtlConfig = toml::from_str(
            r#"
            [logs]
            dir = "/var/log/llm"
            default_tail = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.global.log_level, "info");
        assert_eq!(config.logs.dir, Some(PathBuf::from("/var/log/llm")));
        assert_eq!(config.logs.default_tail, 50);
        assert_eq!(config.logs.poll_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let logs = LogsConfig {
            poll_interval_ms: 0,
            ..LogsConfig::default()
        };
        assert_eq!(logs.poll_interval(), Duration::from_millis(1));
    }
}
