//! File-content cache shared by the extraction and resolution passes.
//!
//! Uses `moka::sync::Cache`, weighted by decoded text length. `try_get_with`
//! runs at most one loader per key even when several workers ask for the
//! same file at once; the others wait for that result.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cfscan_core::errors::LoadError;
use moka::sync::Cache;

use super::{ContentLoader, LoadedContent};

/// Read-through content cache keyed by root-relative path.
pub struct ContentCache {
    root: PathBuf,
    cache: Cache<String, Arc<LoadedContent>>,
    loads: AtomicU64,
}

impl ContentCache {
    /// Create a cache for files under `root`, holding at most `max_bytes`
    /// of decoded text.
    pub fn new(root: &Path, max_bytes: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_bytes)
            .weigher(|_key: &String, value: &Arc<LoadedContent>| -> u32 {
                value.text.len().try_into().unwrap_or(u32::MAX)
            })
            .build();
        Self {
            root: root.to_path_buf(),
            cache,
            loads: AtomicU64::new(0),
        }
    }

    /// Return the content of `relative`, loading it from disk on a miss.
    pub fn get_or_load(&self, relative: &str) -> Result<Arc<LoadedContent>, Arc<LoadError>> {
        self.cache.try_get_with(relative.to_string(), || {
            self.loads.fetch_add(1, Ordering::Relaxed);
            ContentLoader::load(&self.root.join(relative)).map(Arc::new)
        })
    }

    /// Cached content only; never touches the disk.
    pub fn get(&self, relative: &str) -> Option<Arc<LoadedContent>> {
        self.cache.get(relative)
    }

    /// Number of disk loads performed so far.
    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
