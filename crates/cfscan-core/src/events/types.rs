//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_scan_started`.
#[derive(Debug, Clone)]
pub struct ScanStartedEvent {
    pub root: PathBuf,
    pub file_count: usize,
}

/// Payload for `on_file_analyzed`.
#[derive(Debug, Clone)]
pub struct FileAnalyzedEvent {
    pub path: String,
    /// Number of element records extracted from the file.
    pub elements: usize,
}

/// Payload for `on_file_skipped`.
#[derive(Debug, Clone)]
pub struct FileSkippedEvent {
    pub path: String,
    pub reason: String,
}

/// Payload for `on_resolution_complete`.
#[derive(Debug, Clone)]
pub struct ResolutionCompleteEvent {
    pub declarations: usize,
    pub files_searched: usize,
    pub usage_edges: usize,
}

/// Payload for `on_scan_complete`.
#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub files: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}
