use std::path::PathBuf;
use thiserror::Error;

/// llmctl unified error type
#[derive(Error, Debug)]
pub enum LlmCtlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open log file {}: file not found", path.display())]
    LogFileNotFound { path: PathBuf },

    #[error("failed to open log file {}: {source}", path.display())]
    LogFileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read log file {}: {source}", path.display())]
    LogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Model source error: {message}")]
    ModelSource { message: String },

    #[error("Invalid model description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl LlmCtlError {
    /// Classify a failure to open a log file, separating a missing file from
    /// every other open error.
    pub fn log_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::LogFileNotFound { path }
        } else {
            Self::LogFileOpen { path, source }
        }
    }

    pub fn log_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LogRead {
            path: path.into(),
            source,
        }
    }
}

pub type LlmCtlResult<T> = Result<T, LlmCtlError>;
