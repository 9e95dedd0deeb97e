//! Plain-text summary reporter.

use std::fmt::Write;

use cfscan_core::errors::ReportError;

use super::Reporter;
use crate::result::AnalysisResult;

/// Counts per element kind, files per kind, and the busiest tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReporter;

/// Tables listed in the summary.
const TOP_TABLES: usize = 10;

impl Reporter for SummaryReporter {
    fn name(&self) -> &'static str {
        "summary"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn generate(&self, result: &AnalysisResult) -> Result<String, ReportError> {
        let stats = result.stats();
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "cfscan summary for {}", result.root());
        let _ = writeln!(out);
        let _ = writeln!(out, "Files        {:>8}", stats.files);
        for (kind, count) in &stats.files_by_kind {
            let _ = writeln!(out, "  {kind:<11}{count:>8}");
        }
        let _ = writeln!(out, "Lines        {:>8}", stats.total_lines);
        let _ = writeln!(out, "Bytes        {:>8}", stats.total_bytes);
        let _ = writeln!(out, "Skipped      {:>8}", stats.skipped_files);
        let _ = writeln!(out);
        let _ = writeln!(out, "Queries      {:>8}", stats.queries);
        let _ = writeln!(out, "Functions    {:>8}", stats.functions);
        let _ = writeln!(out, "Components   {:>8}", stats.components);
        let _ = writeln!(out, "Invokes      {:>8}", stats.invokes);
        let _ = writeln!(out, "Includes     {:>8}", stats.includes);
        let _ = writeln!(out, "Modules      {:>8}", stats.modules);
        let _ = writeln!(out, "Usage edges  {:>8}", stats.usage_edges);

        let mut tables = result.tables();
        if !tables.is_empty() {
            tables.sort_by(|a, b| b.queries.cmp(&a.queries).then_with(|| a.table.cmp(&b.table)));
            let _ = writeln!(out);
            let _ = writeln!(out, "Top tables");
            for usage in tables.iter().take(TOP_TABLES) {
                let _ = writeln!(out, "  {:<24}{:>6}", usage.table, usage.queries);
            }
        }

        if !result.skipped().is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Skipped files");
            for skipped in result.skipped() {
                let _ = writeln!(out, "  {}: {}", skipped.path, skipped.reason);
            }
        }

        Ok(out)
    }
}
