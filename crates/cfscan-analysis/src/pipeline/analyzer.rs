use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use cfscan_core::config::CfscanConfig;
use cfscan_core::errors::PipelineError;
use cfscan_core::events::types::{
    FileAnalyzedEvent, FileSkippedEvent, ResolutionCompleteEvent, ScanCompleteEvent,
    ScanStartedEvent,
};
use cfscan_core::events::AnalysisEventHandler;
use cfscan_core::cancellation::CancellationToken;
use rayon::prelude::*;

use crate::extract::{FileElements, TagExtractor};
use crate::loader::{ContentCache, LoadedContent};
use crate::resolver::{self, CorpusFile, UsageMap};
use crate::result::AnalysisResult;
use crate::scanner::{CatalogEntry, CatalogResult, Scanner, WalkedFile};

/// Runs analyses with a fixed configuration. Holds no per-run state, so
/// one analyzer can serve any number of sequential or concurrent runs.
pub struct Analyzer {
    config: CfscanConfig,
    scanner: Scanner,
}

/// Pass-1 output for one file.
struct FileUnit {
    entry: CatalogEntry,
    elements: Option<FileElements>,
}

impl Analyzer {
    pub fn new(config: CfscanConfig) -> Self {
        let scanner = Scanner::new(config.scan.clone());
        Self { config, scanner }
    }

    pub fn config(&self) -> &CfscanConfig {
        &self.config
    }

    /// Analyze the tree under `root`.
    ///
    /// Fails only on an invalid root, a worker-pool failure or cancellation;
    /// problems with individual files end up in [`AnalysisResult::skipped`].
    pub fn analyze(
        &self,
        root: &Path,
        handler: &dyn AnalysisEventHandler,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, PipelineError> {
        let start = Instant::now();

        let walk = self.scanner.walk(root)?;
        tracing::info!(root = %root.display(), files = walk.files.len(), "analysis started");
        handler.on_scan_started(&ScanStartedEvent {
            root: root.to_path_buf(),
            file_count: walk.files.len(),
        });

        let pool = build_pool(self.config.scan.effective_threads())?;
        let cache = ContentCache::new(root, self.config.analysis.effective_content_cache_bytes());

        // Pass 1: catalogue + extract, merged back in walk order.
        let units: Vec<Option<FileUnit>> = pool.install(|| {
            walk.files
                .par_iter()
                .map(|file| {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    Some(self.process_file(file, &cache))
                })
                .collect()
        });
        if cancel.is_cancelled() {
            tracing::info!("analysis cancelled during extraction");
            return Err(PipelineError::Cancelled);
        }

        let mut catalog = CatalogResult {
            dirs_skipped: walk.dirs_skipped,
            files_excluded: walk.files_excluded,
            ..Default::default()
        };
        let mut elements: Vec<FileElements> = Vec::new();
        let mut candidates: Vec<String> = Vec::new();

        for unit in units.into_iter().flatten() {
            if let Some(file_elements) = unit.elements {
                if let Some(record) = unit.entry.record() {
                    handler.on_file_analyzed(&FileAnalyzedEvent {
                        path: record.path.clone(),
                        elements: file_elements.len(),
                    });
                }
                elements.push(file_elements);
            }
            match unit.entry {
                CatalogEntry::File { record, content } => {
                    if content.is_some() {
                        candidates.push(record.path.clone());
                    }
                    catalog.files.push(record);
                }
                CatalogEntry::Unreadable { record, skipped } => {
                    emit_skipped(handler, &skipped.path, &skipped.reason.to_string());
                    catalog.files.push(record);
                    catalog.skipped.push(skipped);
                }
                CatalogEntry::Skipped(skipped) => {
                    emit_skipped(handler, &skipped.path, &skipped.reason.to_string());
                    catalog.skipped.push(skipped);
                }
            }
        }

        // Pass 2: usage resolution.
        let usages = if self.config.analysis.effective_resolve_usages() {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            pool.install(|| self.resolve_usages(&elements, &candidates, &cache, handler))
        } else {
            tracing::debug!("usage resolution disabled");
            UsageMap::default()
        };

        let result = AnalysisResult::assemble(root.display().to_string(), catalog, elements, usages);

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let stats = result.stats();
        tracing::info!(
            files = stats.files,
            queries = stats.queries,
            functions = stats.functions,
            components = stats.components,
            invokes = stats.invokes,
            includes = stats.includes,
            modules = stats.modules,
            skipped = stats.skipped_files,
            cache_loads = cache.loads(),
            duration_ms,
            "analysis complete"
        );
        handler.on_scan_complete(&ScanCompleteEvent {
            files: stats.files,
            skipped: stats.skipped_files,
            duration_ms,
        });

        Ok(result)
    }

    fn process_file(&self, file: &WalkedFile, cache: &ContentCache) -> FileUnit {
        let entry = self.scanner.catalog_file(file, cache);
        let elements = match &entry {
            CatalogEntry::File {
                record,
                content: Some(content),
            } => {
                let elements = TagExtractor::extract(&content.text, &record.path);
                tracing::debug!(path = %record.path, elements = elements.len(), "extracted");
                Some(elements)
            }
            _ => None,
        };
        FileUnit { entry, elements }
    }

    fn resolve_usages(
        &self,
        elements: &[FileElements],
        candidates: &[String],
        cache: &ContentCache,
        handler: &dyn AnalysisEventHandler,
    ) -> UsageMap {
        let declarations = resolver::declarations(
            elements.iter().flat_map(|e| &e.functions),
            elements.iter().flat_map(|e| &e.components),
        );

        // Cache hits unless the file was evicted under memory pressure.
        let contents: Vec<(&str, Arc<LoadedContent>)> = candidates
            .par_iter()
            .filter_map(|path| match cache.get_or_load(path) {
                Ok(content) => Some((path.as_str(), content)),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "content vanished before usage search");
                    None
                }
            })
            .collect();
        let corpus: Vec<CorpusFile<'_>> = contents
            .iter()
            .map(|(path, content)| CorpusFile {
                path: *path,
                content: &content.text,
            })
            .collect();

        let usages = resolver::resolve(&declarations, &corpus);
        handler.on_resolution_complete(&ResolutionCompleteEvent {
            declarations: declarations.len(),
            files_searched: corpus.len(),
            usage_edges: usages.edge_count(),
        });
        usages
    }
}

fn emit_skipped(handler: &dyn AnalysisEventHandler, path: &str, reason: &str) {
    handler.on_file_skipped(&FileSkippedEvent {
        path: path.to_string(),
        reason: reason.to_string(),
    });
}

fn build_pool(threads: usize) -> Result<rayon::ThreadPool, PipelineError> {
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("cfscan-worker-{i}"));
    if threads > 0 {
        builder = builder.num_threads(threads);
    }
    builder
        .build()
        .map_err(|e| PipelineError::ThreadPool(e.to_string()))
}
