//! Scanner module - the file catalog.
//!
//! - `ignore` gitignore-style matching for binary, tooling and editor exclusions
//! - deterministic sorted walk with directory pruning
//! - `rayon` for per-file metadata, content and hashing

mod ignores;
mod types;
mod walker;

pub use ignores::{
    IgnorePatterns, DEFAULT_IGNORE_ARTIFACTS, DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_EXTENSIONS,
    IGNORE_FILE,
};
pub use types::{CatalogEntry, CatalogResult, WalkResult, WalkedFile};
pub use walker::Scanner;
