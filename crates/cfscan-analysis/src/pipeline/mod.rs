//! Pipeline - two-pass orchestration of one analysis run.
//!
//! Pass 1 catalogues and extracts every file in parallel; pass 2 resolves
//! usages over the template corpus. The result is assembled only after
//! both passes finish.

mod analyzer;

pub use analyzer::Analyzer;
