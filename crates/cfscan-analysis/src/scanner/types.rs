//! Scanner types - walk output and per-file catalog entries.

use std::path::PathBuf;
use std::sync::Arc;

use crate::loader::LoadedContent;
use crate::model::{FileRecord, SkippedFile};

/// A file found by the walk that passed every exclusion filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub absolute: PathBuf,
    /// Relative to the walk root, `/`-separated.
    pub relative: String,
}

/// Result of walking an analysis root. File order is deterministic:
/// depth-first with directory entries sorted by name.
#[derive(Debug, Clone, Default)]
pub struct WalkResult {
    pub root: PathBuf,
    pub files: Vec<WalkedFile>,
    /// Directories pruned by the exclusion rules.
    pub dirs_skipped: usize,
    /// Files dropped by the exclusion rules.
    pub files_excluded: usize,
    /// Non-fatal errors (unreadable subdirectories).
    pub errors: Vec<String>,
}

/// Outcome of cataloguing one walked file.
#[derive(Debug, Clone)]
pub enum CatalogEntry {
    /// Catalogued with content. `content` is `Some` only for template files,
    /// which are the ones that go through extraction and usage search.
    File {
        record: FileRecord,
        content: Option<Arc<LoadedContent>>,
    },
    /// Catalogued, but the bytes could not be read.
    Unreadable {
        record: FileRecord,
        skipped: SkippedFile,
    },
    /// Not catalogued at all.
    Skipped(SkippedFile),
}

impl CatalogEntry {
    pub fn record(&self) -> Option<&FileRecord> {
        match self {
            Self::File { record, .. } | Self::Unreadable { record, .. } => Some(record),
            Self::Skipped(_) => None,
        }
    }

    pub fn skipped(&self) -> Option<&SkippedFile> {
        match self {
            Self::File { .. } => None,
            Self::Unreadable { skipped, .. } | Self::Skipped(skipped) => Some(skipped),
        }
    }
}

/// The file catalog for one root: records in walk order plus everything
/// that was skipped on the way.
#[derive(Debug, Clone, Default)]
pub struct CatalogResult {
    pub files: Vec<FileRecord>,
    pub skipped: Vec<SkippedFile>,
    pub dirs_skipped: usize,
    pub files_excluded: usize,
}
