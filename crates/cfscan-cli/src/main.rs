mod cli;

use std::process::ExitCode;

use anyhow::{anyhow, Context};
use cfscan_analysis::report::{create_reporter, write_report};
use cfscan_analysis::{AnalysisResult, Analyzer};
use cfscan_core::config::CfscanConfig;
use cfscan_core::events::NoOpHandler;
use cfscan_core::cancellation::CancellationToken;
use clap::Parser;

use cli::Cli;

/// Failure classes, each with its own exit code.
enum Failure {
    /// Invalid root, bad configuration, aborted run.
    Analysis(anyhow::Error),
    /// The result exists but could not be rendered or written.
    Report(anyhow::Error),
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Self::Analysis(_) => 1,
            Self::Report(_) => 2,
        }
    }

    fn error(&self) -> &anyhow::Error {
        match self {
            Self::Analysis(e) | Self::Report(e) => e,
        }
    }
}

fn main() -> ExitCode {
    cfscan_core::tracing::init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("error: {:#}", failure.error());
            ExitCode::from(failure.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let result = analyze(cli).map_err(Failure::Analysis)?;
    report(cli, &result).map_err(Failure::Report)
}

fn analyze(cli: &Cli) -> anyhow::Result<AnalysisResult> {
    let config = CfscanConfig::load(&cli.root, cli.config.as_deref(), Some(&cli.overrides()))
        .context("loading configuration")?;
    let result = Analyzer::new(config)
        .analyze(&cli.root, &NoOpHandler, &CancellationToken::new())
        .with_context(|| format!("analyzing {}", cli.root.display()))?;
    Ok(result)
}

fn report(cli: &Cli, result: &AnalysisResult) -> anyhow::Result<()> {
    let format = cli.format.name();
    let reporter =
        create_reporter(format).ok_or_else(|| anyhow!("no reporter for format {format}"))?;

    match &cli.output {
        Some(dir) => {
            let path = write_report(reporter.as_ref(), result, dir).context("writing report")?;
            tracing::info!(path = %path.display(), "done");
        }
        None => {
            let rendered = reporter.generate(result).context("rendering report")?;
            println!("{rendered}");
        }
    }
    Ok(())
}
