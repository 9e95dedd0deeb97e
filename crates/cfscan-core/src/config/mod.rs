//! Configuration system for cfscan.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod analysis_config;
pub mod cfscan_config;
pub mod scan_config;

pub use analysis_config::AnalysisConfig;
pub use cfscan_config::{CfscanConfig, CliOverrides};
pub use scan_config::ScanConfig;
