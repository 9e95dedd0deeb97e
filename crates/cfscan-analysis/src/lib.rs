//! cfscan-analysis: extraction and dependency-resolution engine.
//!
//! Walks a tree of CFML templates and produces an immutable inventory of
//! queries, functions, components, invokes, includes and modules, plus the
//! files that reference each declared function and component.
//!
//! - Scanner: deterministic walk with binary/tooling/editor exclusions
//! - Loader: encoding-tolerant content loading and a shared content cache
//! - Extract: regex-located tags and point-lookup attribute parsing
//! - Sql: table inference and complexity tiers for query blocks
//! - Resolver: multi-pattern textual usage search (second pass)
//! - Result: the aggregate handed to reporters
//! - Pipeline: two-pass orchestration on a rayon pool
//! - Report: read-only JSON and summary renderers

pub mod extract;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod result;
pub mod scanner;
pub mod sql;

pub use extract::{FileElements, TagExtractor};
pub use loader::{ContentCache, ContentLoader, Encoding, LoadedContent};
pub use model::*;
pub use pipeline::Analyzer;
pub use report::{create_reporter, write_report, JsonReporter, Reporter, SummaryReporter};
pub use resolver::{resolve, CorpusFile, Declaration, DeclarationId, DeclarationKind, UsageMap};
pub use result::{AnalysisResult, AnalysisStats, QueryGroup, TableUsage};
pub use scanner::{CatalogEntry, CatalogResult, Scanner, WalkResult, WalkedFile};
pub use sql::{Complexity, InferredTable, SqlAnalysis, SqlAnalyzer};
