//! Tests for the event handler defaults.

use std::path::PathBuf;
use std::sync::Mutex;

use cfscan_core::events::*;

#[derive(Default)]
struct RecordingHandler {
    skipped: Mutex<Vec<FileSkippedEvent>>,
}

impl AnalysisEventHandler for RecordingHandler {
    fn on_file_skipped(&self, event: &FileSkippedEvent) {
        self.skipped.lock().unwrap().push(event.clone());
    }
}

#[test]
fn test_default_methods_are_noops() {
    let handler = NoOpHandler;
    handler.on_scan_started(&ScanStartedEvent {
        root: PathBuf::from("/app"),
        file_count: 3,
    });
    handler.on_scan_complete(&ScanCompleteEvent {
        files: 3,
        skipped: 0,
        duration_ms: 1,
    });
}

#[test]
fn test_handler_overrides_only_what_it_needs() {
    let handler = RecordingHandler::default();
    handler.on_file_analyzed(&FileAnalyzedEvent {
        path: "index.cfm".to_string(),
        elements: 2,
    });
    handler.on_file_skipped(&FileSkippedEvent {
        path: "locked.cfm".to_string(),
        reason: "permission denied".to_string(),
    });

    let skipped = handler.skipped.lock().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].path, "locked.cfm");
}

#[test]
fn test_handler_is_object_safe() {
    let handlers: Vec<Box<dyn AnalysisEventHandler>> =
        vec![Box::new(NoOpHandler), Box::new(RecordingHandler::default())];
    for handler in &handlers {
        handler.on_resolution_complete(&ResolutionCompleteEvent {
            declarations: 0,
            files_searched: 0,
            usage_edges: 0,
        });
    }
}
