//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the extraction and resolution passes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Run the dependency-resolution pass. Default: true.
    pub resolve_usages: Option<bool>,
    /// Byte budget of the file-content cache shared by both passes. Default: 512 MiB.
    pub content_cache_bytes: Option<u64>,
}

impl AnalysisConfig {
    /// Returns whether usages are resolved, defaulting to true.
    pub fn effective_resolve_usages(&self) -> bool {
        self.resolve_usages.unwrap_or(true)
    }

    /// Returns the content cache budget, defaulting to 512 MiB.
    pub fn effective_content_cache_bytes(&self) -> u64 {
        self.content_cache_bytes.unwrap_or(512 * 1024 * 1024)
    }
}
