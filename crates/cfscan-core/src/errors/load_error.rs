//! Content loading errors.

use std::path::PathBuf;

use super::error_code::{self, CfscanErrorCode};

/// The raw bytes of a file could not be read.
///
/// Decoding never fails; this only covers permission errors and files that
/// vanished between the walk and the read.
#[derive(Debug, thiserror::Error)]
#[error("Cannot read {path}: {source}")]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl CfscanErrorCode for LoadError {
    fn error_code(&self) -> &'static str {
        error_code::LOAD_ERROR
    }
}
