//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, CfscanErrorCode};

/// Errors that can occur while walking the analysis root.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Analysis root does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Analysis root is not a directory: {path}")]
    RootNotDirectory { path: PathBuf },

    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scan cancelled")]
    Cancelled,
}

impl CfscanErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RootNotFound { .. } | Self::RootNotDirectory { .. } => error_code::INVALID_ROOT,
            Self::Cancelled => error_code::CANCELLED,
            Self::IoError { .. } => error_code::SCAN_ERROR,
        }
    }
}
