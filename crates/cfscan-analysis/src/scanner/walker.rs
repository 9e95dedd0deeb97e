//! Deterministic file walker and per-file cataloguing.
//!
//! The directory walk is single-threaded so the file order is stable across
//! runs; cataloguing (metadata, content, hashing) runs in parallel with rayon.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cfscan_core::config::ScanConfig;
use cfscan_core::errors::ScanError;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use xxhash_rust::xxh3::xxh3_64;

use super::ignores::IgnorePatterns;
use super::types::{CatalogEntry, CatalogResult, WalkResult, WalkedFile};
use crate::loader::{line_count, ContentCache, ContentLoader, LoadedContent};
use crate::model::{FileKind, FileRecord, SkipReason, SkippedFile};

/// File catalog builder.
pub struct Scanner {
    config: ScanConfig,
    template_extensions: Vec<String>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        let template_extensions = config.effective_template_extensions();
        Self {
            config,
            template_extensions,
        }
    }

    /// Whether files with this (lowercased) extension go through extraction.
    pub fn is_template_extension(&self, extension: &str) -> bool {
        self.template_extensions.iter().any(|e| e == extension)
    }

    /// Walk `root` and catalogue every file, in walk order.
    ///
    /// `cache` must be rooted at `root`.
    pub fn scan(&self, root: &Path, cache: &ContentCache) -> Result<CatalogResult, ScanError> {
        let walk = self.walk(root)?;
        let entries: Vec<CatalogEntry> = walk
            .files
            .par_iter()
            .map(|file| self.catalog_file(file, cache))
            .collect();

        let mut result = CatalogResult {
            dirs_skipped: walk.dirs_skipped,
            files_excluded: walk.files_excluded,
            ..Default::default()
        };
        for entry in entries {
            match entry {
                CatalogEntry::File { record, .. } => result.files.push(record),
                CatalogEntry::Unreadable { record, skipped } => {
                    result.files.push(record);
                    result.skipped.push(skipped);
                }
                CatalogEntry::Skipped(skipped) => result.skipped.push(skipped),
            }
        }
        Ok(result)
    }

    /// Collect the files under `root` that pass the exclusion rules.
    pub fn walk(&self, root: &Path) -> Result<WalkResult, ScanError> {
        if !root.exists() {
            return Err(ScanError::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        if !root.is_dir() {
            return Err(ScanError::RootNotDirectory {
                path: root.to_path_buf(),
            });
        }

        let ignores = IgnorePatterns::new(root, &self.config.extra_ignore);
        let mut result = WalkResult {
            root: root.to_path_buf(),
            ..Default::default()
        };

        let mut visited = FxHashSet::default();
        if self.config.effective_follow_symlinks() {
            if let Ok(canonical) = fs::canonicalize(root) {
                visited.insert(canonical);
            }
        }

        let entries = read_dir_sorted(root).map_err(|source| ScanError::IoError {
            path: root.to_path_buf(),
            source,
        })?;
        self.walk_entries(root, entries, &ignores, &mut visited, &mut result);

        tracing::debug!(
            root = %root.display(),
            files = result.files.len(),
            dirs_skipped = result.dirs_skipped,
            files_excluded = result.files_excluded,
            "walk complete"
        );
        Ok(result)
    }

    fn walk_dir(
        &self,
        root: &Path,
        dir: &Path,
        ignores: &IgnorePatterns,
        visited: &mut FxHashSet<PathBuf>,
        result: &mut WalkResult,
    ) {
        match read_dir_sorted(dir) {
            Ok(entries) => self.walk_entries(root, entries, ignores, visited, result),
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "cannot read directory");
                result.errors.push(format!("{}: {}", dir.display(), e));
            }
        }
    }

    fn walk_entries(
        &self,
        root: &Path,
        entries: Vec<fs::DirEntry>,
        ignores: &IgnorePatterns,
        visited: &mut FxHashSet<PathBuf>,
        result: &mut WalkResult,
    ) {
        for entry in entries {
            let path = entry.path();
            // Matched as a native `Path`: on Windows `\` separates components
            // just like `/`, so `app\cache\x.cfm` prunes at `cache`. Only the
            // recorded string is normalised to `/`.
            let relative = path.strip_prefix(root).unwrap_or(&path);
            let Some((is_dir, is_file)) = self.entry_kind(&entry) else {
                continue;
            };

            if is_dir {
                if ignores.is_ignored(relative, true) {
                    tracing::trace!(path = %relative.display(), "pruned directory");
                    result.dirs_skipped += 1;
                    continue;
                }
                // Symlinked directories can form cycles.
                if self.config.effective_follow_symlinks() {
                    if let Ok(canonical) = fs::canonicalize(&path) {
                        if !visited.insert(canonical) {
                            continue;
                        }
                    }
                }
                self.walk_dir(root, &path, ignores, visited, result);
            } else if is_file {
                if ignores.is_ignored(relative, false) {
                    result.files_excluded += 1;
                    continue;
                }
                result.files.push(WalkedFile {
                    relative: to_relative_string(relative),
                    absolute: path.clone(),
                });
            }
        }
    }

    /// `(is_dir, is_file)`, or `None` for entries that are skipped outright.
    fn entry_kind(&self, entry: &fs::DirEntry) -> Option<(bool, bool)> {
        let file_type = entry.file_type().ok()?;
        if file_type.is_symlink() {
            if !self.config.effective_follow_symlinks() {
                return None;
            }
            let target = fs::metadata(entry.path()).ok()?;
            return Some((target.is_dir(), target.is_file()));
        }
        Some((file_type.is_dir(), file_type.is_file()))
    }

    /// Build the catalog entry for one walked file.
    ///
    /// Template content goes through `cache` so the resolver pass reuses it;
    /// other files are read once for their line count and then dropped.
    pub fn catalog_file(&self, file: &WalkedFile, cache: &ContentCache) -> CatalogEntry {
        let metadata = match fs::metadata(&file.absolute) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %file.relative, error = %e, "skipping file, metadata unavailable");
                return CatalogEntry::Skipped(SkippedFile {
                    path: file.relative.clone(),
                    reason: SkipReason::Metadata {
                        message: e.to_string(),
                    },
                });
            }
        };

        let size = metadata.len();
        let limit = self.config.effective_max_file_size();
        if size > limit {
            tracing::debug!(path = %file.relative, size, limit, "skipping oversized file");
            return CatalogEntry::Skipped(SkippedFile {
                path: file.relative.clone(),
                reason: SkipReason::TooLarge { size, limit },
            });
        }

        let as_path = Path::new(&file.relative);
        let name = as_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.relative.clone());
        let extension = as_path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let is_template = self.is_template_extension(&extension);

        let mut record = FileRecord {
            path: file.relative.clone(),
            name,
            kind: FileKind::from_extension(&extension),
            extension,
            size,
            line_count: 0,
            encoding: None,
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
            hash: None,
        };

        let loaded: Result<Arc<LoadedContent>, String> = if is_template {
            cache.get_or_load(&file.relative).map_err(|e| e.to_string())
        } else {
            ContentLoader::load(&file.absolute)
                .map(Arc::new)
                .map_err(|e| e.to_string())
        };

        match loaded {
            Ok(content) => {
                record.line_count = line_count(&content.text);
                record.encoding = Some(content.encoding);
                if self.config.effective_compute_hashes() {
                    record.hash = Some(format!("{:016x}", xxh3_64(content.text.as_bytes())));
                }
                tracing::debug!(
                    path = %record.path,
                    kind = %record.kind,
                    lines = record.line_count,
                    "catalogued"
                );
                CatalogEntry::File {
                    record,
                    content: is_template.then_some(content),
                }
            }
            Err(message) => {
                tracing::warn!(path = %file.relative, error = %message, "content unreadable, cataloguing without content");
                let skipped = SkippedFile {
                    path: file.relative.clone(),
                    reason: SkipReason::Unreadable { message },
                };
                CatalogEntry::Unreadable { record, skipped }
            }
        }
    }
}

fn read_dir_sorted(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries: Vec<fs::DirEntry> = fs::read_dir(dir)?.filter_map(Result::ok).collect();
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}

fn to_relative_string(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
