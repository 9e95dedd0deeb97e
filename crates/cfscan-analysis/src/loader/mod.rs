//! Content loading - raw reads, tolerant decoding and the shared content cache.

mod cache;
mod encoding;

pub use cache::ContentCache;
pub use encoding::{decode, line_count, sanitize, Encoding, LoadedContent};

use std::path::Path;

use cfscan_core::errors::LoadError;

/// Loads file content under uncertain encoding.
pub struct ContentLoader;

impl ContentLoader {
    /// Read and decode `path`.
    ///
    /// Decoding never fails; the only error is the raw byte read itself
    /// (permissions, file removed mid-walk).
    pub fn load(path: &Path) -> Result<LoadedContent, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        let content = decode(&bytes);
        match content.encoding {
            Encoding::Sanitized => {
                tracing::warn!(
                    path = %path.display(),
                    "no text encoding fits, using sanitized byte decode"
                );
            }
            encoding => {
                tracing::debug!(path = %path.display(), %encoding, "decoded");
            }
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ContentLoader::load(&dir.path().join("gone.cfm")).unwrap_err();
        assert!(err.path.ends_with("gone.cfm"));
    }

    #[test]
    fn test_load_windows_1252_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("legacy.cfm");
        std::fs::write(&path, [b'<', b'p', b'>', 0x96, b'<', b'/', b'p', b'>']).unwrap();
        let content = ContentLoader::load(&path).unwrap();
        assert_eq!(content.encoding, Encoding::Windows1252);
        assert_eq!(content.text, "<p>\u{2013}</p>");
    }
}
