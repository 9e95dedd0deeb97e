//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Extensions that are run through tag extraction by default.
/// Markup pages are included: legacy apps embed CFML tags in `.htm`/`.html`.
pub const DEFAULT_TEMPLATE_EXTENSIONS: &[&str] = &["cfm", "cfml", "cfc", "htm", "html"];

/// Configuration for the file catalog walk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 10 MiB.
    pub max_file_size: Option<u64>,
    /// Worker threads. 0 = rayon default. Default: 0.
    pub threads: Option<usize>,
    /// Extra gitignore-style exclusion patterns.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Compute an xxh3 content hash per file. Default: false.
    pub compute_hashes: Option<bool>,
    /// Extensions (without dot, case-insensitive) that get tag extraction.
    #[serde(default)]
    pub template_extensions: Vec<String>,
}

impl ScanConfig {
    /// Returns the effective max file size, defaulting to 10 MiB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(10 * 1024 * 1024)
    }

    /// Returns the effective thread count, defaulting to 0 (auto).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_compute_hashes(&self) -> bool {
        self.compute_hashes.unwrap_or(false)
    }

    /// Returns the lowercased template extensions, falling back to
    /// [`DEFAULT_TEMPLATE_EXTENSIONS`] when none are configured.
    pub fn effective_template_extensions(&self) -> Vec<String> {
        if self.template_extensions.is_empty() {
            DEFAULT_TEMPLATE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect()
        } else {
            self.template_extensions
                .iter()
                .map(|s| s.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }
}
