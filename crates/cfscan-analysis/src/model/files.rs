//! File catalog entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::loader::Encoding;

/// Classification of a catalogued file, derived only from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// `.cfm` / `.cfml` page templates.
    Template,
    /// `.cfc` components.
    Component,
    /// `.htm` / `.html` markup.
    Markup,
    Unknown,
}

impl FileKind {
    /// Classify an extension (without dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "cfm" | "cfml" => Self::Template,
            "cfc" => Self::Component,
            "htm" | "html" => Self::Markup,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Template => "Template",
            Self::Component => "Component",
            Self::Markup => "Markup",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalogued file. Identity is `path`, relative to the analysis root
/// with `/` separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub name: String,
    /// Lowercased extension without the dot; empty when the file has none.
    pub extension: String,
    pub kind: FileKind,
    pub size: u64,
    pub line_count: usize,
    /// Encoding the content was decoded with; `None` when it could not be read.
    pub encoding: Option<Encoding>,
    pub modified: Option<DateTime<Utc>>,
    /// xxh3 content hash, when hashing is enabled.
    pub hash: Option<String>,
}

/// Why a walked file did not make it (fully) into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Larger than `scan.max_file_size`; not catalogued.
    TooLarge { size: u64, limit: u64 },
    /// Metadata could not be read (typically removed mid-walk); not catalogued.
    Metadata { message: String },
    /// Catalogued, but the content could not be read, so nothing was extracted.
    Unreadable { message: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge { size, limit } => {
                write!(f, "file too large ({size} bytes, limit {limit})")
            }
            Self::Metadata { message } => write!(f, "metadata unavailable: {message}"),
            Self::Unreadable { message } => write!(f, "content unreadable: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(FileKind::from_extension("cfm"), FileKind::Template);
        assert_eq!(FileKind::from_extension("CFML"), FileKind::Template);
        assert_eq!(FileKind::from_extension("cfc"), FileKind::Component);
        assert_eq!(FileKind::from_extension("Html"), FileKind::Markup);
        assert_eq!(FileKind::from_extension("js"), FileKind::Unknown);
        assert_eq!(FileKind::from_extension(""), FileKind::Unknown);
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::TooLarge { size: 20, limit: 10 };
        assert_eq!(reason.to_string(), "file too large (20 bytes, limit 10)");
    }
}
