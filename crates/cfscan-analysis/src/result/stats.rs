use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::AnalysisResult;

/// Aggregate counts for a run. Contains nothing time-dependent, so an
/// unchanged tree always produces identical stats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub files: usize,
    /// Catalogued files per kind label.
    pub files_by_kind: BTreeMap<String, usize>,
    pub total_bytes: u64,
    pub total_lines: usize,
    pub queries: usize,
    pub functions: usize,
    pub components: usize,
    pub invokes: usize,
    pub includes: usize,
    pub modules: usize,
    /// (declaration, file) usage pairs.
    pub usage_edges: usize,
    pub skipped_files: usize,
    pub dirs_skipped: usize,
    pub files_excluded: usize,
}

impl AnalysisStats {
    pub(super) fn compute(result: &AnalysisResult, dirs_skipped: usize, files_excluded: usize) -> Self {
        let mut files_by_kind = BTreeMap::new();
        for file in result.files() {
            *files_by_kind.entry(file.kind.label().to_string()).or_insert(0) += 1;
        }

        let usage_edges = result
            .functions()
            .iter()
            .map(|f| f.used_in.len())
            .chain(result.components().iter().map(|c| c.used_in.len()))
            .sum();

        Self {
            files: result.files().len(),
            files_by_kind,
            total_bytes: result.files().iter().map(|f| f.size).sum(),
            total_lines: result.files().iter().map(|f| f.line_count).sum(),
            queries: result.queries().len(),
            functions: result.functions().len(),
            components: result.components().len(),
            invokes: result.invokes().len(),
            includes: result.includes().len(),
            modules: result.modules().len(),
            usage_edges,
            skipped_files: result.skipped().len(),
            dirs_skipped,
            files_excluded,
        }
    }

    /// Total element records of all six kinds.
    pub fn elements(&self) -> usize {
        self.queries + self.functions + self.components + self.invokes + self.includes + self.modules
    }
}
