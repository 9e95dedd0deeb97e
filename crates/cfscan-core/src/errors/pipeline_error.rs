//! Pipeline errors.

use super::error_code::{self, CfscanErrorCode};
use super::{ConfigError, ScanError};

/// Errors that abort an analysis run.
/// Per-file problems never end up here; they are logged and recorded as
/// skipped files on the result.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("Pipeline cancelled")]
    Cancelled,
}

impl CfscanErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::ThreadPool(_) => error_code::SCAN_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
