//! The analysis result - an immutable aggregate of one run.

mod groups;
mod stats;

pub use groups::{abbreviate, QueryGroup, TableUsage, SQL_EXTRACT_LIMIT, UNNAMED_QUERY};
pub use stats::AnalysisStats;

use serde::{Deserialize, Serialize};

use crate::extract::FileElements;
use crate::model::{
    ComponentRecord, FileRecord, FunctionRecord, IncludeRecord, InvokeRecord, ModuleRecord,
    QueryRecord, SkippedFile,
};
use crate::resolver::{DeclarationId, UsageMap};
use crate::scanner::CatalogResult;

/// Everything one analysis run produced.
///
/// Built once by the pipeline; afterwards only readable. Collections keep
/// catalog order, and within one file, source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    root: String,
    files: Vec<FileRecord>,
    queries: Vec<QueryRecord>,
    functions: Vec<FunctionRecord>,
    components: Vec<ComponentRecord>,
    invokes: Vec<InvokeRecord>,
    includes: Vec<IncludeRecord>,
    modules: Vec<ModuleRecord>,
    skipped: Vec<SkippedFile>,
    stats: AnalysisStats,
}

impl AnalysisResult {
    /// Assemble the result from the catalog, per-file extractions (in
    /// catalog order) and the usage map. Usage lists are written here and
    /// nowhere else.
    pub fn assemble(
        root: impl Into<String>,
        catalog: CatalogResult,
        elements: Vec<FileElements>,
        mut usages: UsageMap,
    ) -> Self {
        let mut result = Self {
            root: root.into(),
            files: catalog.files,
            queries: Vec::new(),
            functions: Vec::new(),
            components: Vec::new(),
            invokes: Vec::new(),
            includes: Vec::new(),
            modules: Vec::new(),
            skipped: catalog.skipped,
            stats: AnalysisStats::default(),
        };

        for file in elements {
            result.queries.extend(file.queries);
            result.functions.extend(file.functions);
            result.components.extend(file.components);
            result.invokes.extend(file.invokes);
            result.includes.extend(file.includes);
            result.modules.extend(file.modules);
        }

        for (i, function) in result.functions.iter_mut().enumerate() {
            function.used_in = usages.take(DeclarationId::Function(i));
        }
        for (i, component) in result.components.iter_mut().enumerate() {
            component.used_in = usages.take(DeclarationId::Component(i));
        }

        result.stats = AnalysisStats::compute(&result, catalog.dirs_skipped, catalog.files_excluded);
        result
    }

    /// The analysis root as given to the run.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn queries(&self) -> &[QueryRecord] {
        &self.queries
    }

    pub fn functions(&self) -> &[FunctionRecord] {
        &self.functions
    }

    pub fn components(&self) -> &[ComponentRecord] {
        &self.components
    }

    pub fn invokes(&self) -> &[InvokeRecord] {
        &self.invokes
    }

    pub fn includes(&self) -> &[IncludeRecord] {
        &self.includes
    }

    pub fn modules(&self) -> &[ModuleRecord] {
        &self.modules
    }

    /// Files that were walked but not (fully) analyzed.
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }

    /// Look up a catalogued file by its relative path.
    pub fn file(&self, path: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Queries grouped by name, in first-seen order.
    pub fn query_groups(&self) -> Vec<QueryGroup> {
        groups::group_queries(&self.queries)
    }

    /// Distinct inferred tables with the number of queries hitting each,
    /// sorted by table name.
    pub fn tables(&self) -> Vec<TableUsage> {
        groups::table_usage(&self.queries)
    }
}
