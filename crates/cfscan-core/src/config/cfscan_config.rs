//! Top-level cfscan configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, ScanConfig};
use crate::errors::ConfigError;

/// Name of the project config file looked up in the analysis root.
pub const PROJECT_CONFIG_FILE: &str = "cfscan.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CFSCAN_*`)
/// 3. Project config (`cfscan.toml` in the analysis root) or an explicit file
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CfscanConfig {
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_max_file_size: Option<u64>,
    pub scan_threads: Option<usize>,
    pub resolve_usages: Option<bool>,
    pub compute_hashes: Option<bool>,
}

impl CfscanConfig {
    /// Load configuration with layered resolution.
    ///
    /// `config_file` replaces the project lookup when given; unlike the
    /// implicit `cfscan.toml`, a missing explicit file is an error.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.is_file() {
                    ::tracing::debug!(path = %project_config_path.display(), "loading project config");
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &CfscanConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config
            .scan
            .template_extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed {
                field: "scan.template_extensions".to_string(),
                message: "extensions must not be empty".to_string(),
            });
        }
        if config.analysis.content_cache_bytes == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.content_cache_bytes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut CfscanConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: CfscanConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value or a non-empty list.
    fn merge(base: &mut CfscanConfig, other: &CfscanConfig) {
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.compute_hashes.is_some() {
            base.scan.compute_hashes = other.scan.compute_hashes;
        }
        if !other.scan.template_extensions.is_empty() {
            base.scan.template_extensions = other.scan.template_extensions.clone();
        }

        if other.analysis.resolve_usages.is_some() {
            base.analysis.resolve_usages = other.analysis.resolve_usages;
        }
        if other.analysis.content_cache_bytes.is_some() {
            base.analysis.content_cache_bytes = other.analysis.content_cache_bytes;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `CFSCAN_SCAN_MAX_FILE_SIZE`, `CFSCAN_SCAN_THREADS`, etc.
    fn apply_env_overrides(config: &mut CfscanConfig) {
        if let Ok(val) = std::env::var("CFSCAN_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CFSCAN_SCAN_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CFSCAN_SCAN_COMPUTE_HASHES") {
            if let Ok(v) = val.parse::<bool>() {
                config.scan.compute_hashes = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CFSCAN_ANALYSIS_RESOLVE_USAGES") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.resolve_usages = Some(v);
            }
        }
        if let Ok(val) = std::env::var("CFSCAN_ANALYSIS_CONTENT_CACHE_BYTES") {
            if let Ok(v) = val.parse::<u64>() {
                config.analysis.content_cache_bytes = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut CfscanConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scan_max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.resolve_usages {
            config.analysis.resolve_usages = Some(v);
        }
        if let Some(v) = cli.compute_hashes {
            config.scan.compute_hashes = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
