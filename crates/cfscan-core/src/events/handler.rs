//! AnalysisEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing an analysis run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. The trait requires `Send + Sync`
/// because pass 1 emits per-file events from rayon workers.
pub trait AnalysisEventHandler: Send + Sync {
    fn on_scan_started(&self, _event: &ScanStartedEvent) {}
    fn on_file_analyzed(&self, _event: &FileAnalyzedEvent) {}
    fn on_file_skipped(&self, _event: &FileSkippedEvent) {}
    fn on_resolution_complete(&self, _event: &ResolutionCompleteEvent) {}
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
}

/// Handler that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl AnalysisEventHandler for NoOpHandler {}
