use crate::cli::args::OutputFormat;
use crate::core::report;
use crate::domain::config::LlmCtlConfig;
use crate::domain::error::LlmCtlError;
use crate::domain::model::ModelDescription;
use crate::infrastructure::paths::LogPaths;
use std::io::{self, Write};
use tabled::{Table, Tabled};

/// Output writer trait for different formats
pub trait OutputWriter {
    fn write_description(&self, description: &ModelDescription, verbose: bool) -> Result<(), OutputError>;
    fn write_raw(&self, text: &str) -> Result<(), OutputError>;
    fn write_paths(&self, paths: &LogPaths) -> Result<(), OutputError>;
    fn write_config(&self, config: &LlmCtlConfig) -> Result<(), OutputError>;
    fn write_message(&self, message: &str) -> Result<(), OutputError>;
    fn write_error(&self, error: &str) -> Result<(), OutputError>;
}

/// Output formatting errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Report error: {0}")]
    ReportError(String),
}

impl From<OutputError> for LlmCtlError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::IoError(e) => Self::Io(e),
            other => Self::Output(other.to_string()),
        }
    }
}

/// Writer over any `Write` sink, stdout by default
pub struct ConsoleWriter<W: Write = io::Stdout> {
    format: OutputFormat,
    sink: std::cell::RefCell<W>,
}

impl ConsoleWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_sink(format, io::stdout())
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn with_sink(format: OutputFormat, sink: W) -> Self {
        Self {
            format,
            sink: std::cell::RefCell::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }

    fn line(&self, text: &str) -> Result<(), OutputError> {
        let mut sink = self.sink.borrow_mut();
        writeln!(sink, "{}", text)?;
        sink.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for ConsoleWriter<W> {
    fn write_description(&self, description: &ModelDescription, verbose: bool) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => self.line(&serde_json::to_string_pretty(description)?),
            OutputFormat::Text | OutputFormat::Table => {
                let mut sink = self.sink.borrow_mut();
                report::render(description, verbose, &mut *sink).map_err(|e| match e {
                    LlmCtlError::Io(e) => OutputError::IoError(e),
                    other => OutputError::ReportError(other.to_string()),
                })
            }
        }
    }

    fn write_raw(&self, text: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => self.line(&serde_json::to_string_pretty(&serde_json::json!({ "value": text }))?),
            _ => {
                let mut sink = self.sink.borrow_mut();
                sink.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    sink.write_all(b"\n")?;
                }
                sink.flush()?;
                Ok(())
            }
        }
    }

    fn write_paths(&self, paths: &LogPaths) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                self.line(&format!("server log: {}", paths.server_log.display()))?;
                self.line(&format!("app log:    {}", paths.app_log.display()))
            }
            OutputFormat::Json => self.line(&serde_json::to_string_pretty(paths)?),
            OutputFormat::Table => {
                let rows = vec![
                    LogFileRow::new("server", &paths.server_log),
                    LogFileRow::new("app", &paths.app_log),
                ];
                self.line(&Table::new(rows).to_string())
            }
        }
    }

    fn write_config(&self, config: &LlmCtlConfig) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Text => {
                self.line("llmctl configuration:")?;
                self.line(&format!("  Log level: {}", config.global.log_level))?;
                let dir = config
                    .logs
                    .dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "(default)".to_string());
                self.line(&format!("  Log directory: {}", dir))?;
                self.line(&format!("  Poll interval: {}ms", config.logs.poll_interval_ms))?;
                self.line(&format!("  Default tail: {}", config.logs.default_tail))
            }
            OutputFormat::Json => self.line(&serde_json::to_string_pretty(config)?),
            OutputFormat::Table => {
                let rows = vec![
                    SettingRow::new("global.log_level", &config.global.log_level),
                    SettingRow::new(
                        "logs.dir",
                        &config
                            .logs
                            .dir
                            .as_ref()
                            .map(|dir| dir.display().to_string())
                            .unwrap_or_default(),
                    ),
                    SettingRow::new("logs.poll_interval_ms", &config.logs.poll_interval_ms.to_string()),
                    SettingRow::new("logs.default_tail", &config.logs.default_tail.to_string()),
                ];
                self.line(&Table::new(rows).to_string())
            }
        }
    }

    fn write_message(&self, message: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "message": message,
                    "level": "info"
                });
                self.line(&serde_json::to_string_pretty(&output)?)
            }
            _ => self.line(message),
        }
    }

    fn write_error(&self, error: &str) -> Result<(), OutputError> {
        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "error": error,
                    "level": "error"
                });
                eprintln!("{}", serde_json::to_string_pretty(&output)?);
            }
            _ => {
                eprintln!("Error: {}", error);
            }
        }
        Ok(())
    }
}

/// Table row for a log file location
#[derive(Tabled)]
struct LogFileRow {
    log: String,
    path: String,
    exists: bool,
}

impl LogFileRow {
    fn new(log: &str, path: &std::path::Path) -> Self {
        Self {
            log: log.to_string(),
            path: path.display().to_string(),
            exists: path.exists(),
        }
    }
}

/// Table row for a configuration setting
#[derive(Tabled)]
struct SettingRow {
    setting: String,
    value: String,
}

impl SettingRow {
    fn new(setting: &str, value: &str) -> Self {
        Self {
            setting: setting.to_string(),
            value: value.to_string(),
        }
    }
}
