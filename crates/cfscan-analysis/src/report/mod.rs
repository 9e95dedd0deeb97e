//! Reporters - read-only renderings of an analysis result.

mod json;
mod summary;

pub use json::JsonReporter;
pub use summary::SummaryReporter;

use std::path::{Path, PathBuf};

use cfscan_core::errors::ReportError;

use crate::result::AnalysisResult;

/// Base name of report files written by [`write_report`].
pub const REPORT_FILE_STEM: &str = "cfscan-report";

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    /// File extension for written reports, without the dot.
    fn extension(&self) -> &'static str;
    fn generate(&self, result: &AnalysisResult) -> Result<String, ReportError>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "json" => Some(Box::new(JsonReporter::default())),
        "summary" => Some(Box::new(SummaryReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["json", "summary"]
}

/// Render `result` and write it to `dir/cfscan-report.<ext>`, creating
/// `dir` if needed. Returns the written path.
pub fn write_report(
    reporter: &dyn Reporter,
    result: &AnalysisResult,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    let rendered = reporter.generate(result)?;
    let path = dir.join(format!("{REPORT_FILE_STEM}.{}", reporter.extension()));
    std::fs::create_dir_all(dir)
        .and_then(|()| std::fs::write(&path, rendered))
        .map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
    tracing::info!(reporter = reporter.name(), path = %path.display(), "report written");
    Ok(path)
}
