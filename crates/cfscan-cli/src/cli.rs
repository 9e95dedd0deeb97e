use std::path::PathBuf;

use cfscan_core::config::CliOverrides;
use clap::{Parser, ValueEnum};

/// cfscan: static inventory of CFML template trees
#[derive(Parser, Debug)]
#[command(name = "cfscan", version)]
#[command(about = "Inventory queries, functions, components and their usages in a CFML tree", long_about = None)]
pub struct Cli {
    /// Root directory of the application to analyze
    pub root: PathBuf,

    /// Write the report into this directory instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, short, value_enum, default_value_t = Format::Summary)]
    pub format: Format,

    /// Config file to use instead of <ROOT>/cfscan.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Largest file to analyze, in bytes
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Record an xxh3 content hash per file
    #[arg(long)]
    pub hashes: bool,

    /// Skip the usage search pass
    #[arg(long)]
    pub no_usages: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Summary,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Summary => "summary",
        }
    }
}

impl Cli {
    /// Flags that override file and environment configuration.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            scan_max_file_size: self.max_file_size,
            scan_threads: self.threads,
            resolve_usages: self.no_usages.then_some(false),
            compute_hashes: self.hashes.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["cfscan", "app"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("app"));
        assert_eq!(cli.format, Format::Summary);
        assert!(cli.output.is_none());
        let overrides = cli.overrides();
        assert_eq!(overrides.scan_threads, None);
        assert_eq!(overrides.resolve_usages, None);
        assert_eq!(overrides.compute_hashes, None);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "cfscan",
            "/srv/app",
            "--output",
            "reports",
            "--format",
            "json",
            "--config",
            "custom.toml",
            "--threads",
            "4",
            "--max-file-size",
            "1024",
            "--hashes",
            "--no-usages",
        ])
        .unwrap();
        assert_eq!(cli.format, Format::Json);
        assert_eq!(cli.output, Some(PathBuf::from("reports")));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let overrides = cli.overrides();
        assert_eq!(overrides.scan_threads, Some(4));
        assert_eq!(overrides.scan_max_file_size, Some(1024));
        assert_eq!(overrides.resolve_usages, Some(false));
        assert_eq!(overrides.compute_hashes, Some(true));
    }

    #[test]
    fn test_root_is_required() {
        assert!(Cli::try_parse_from(["cfscan"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["cfscan", "app", "--format", "xml"]).is_err());
    }
}
