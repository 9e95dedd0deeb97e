//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CFSCAN_LOG";

/// Initialize the cfscan tracing/logging system.
///
/// Reads `CFSCAN_LOG` for per-module log levels, e.g.
/// `CFSCAN_LOG=cfscan_analysis::loader=debug,cfscan_analysis=info`.
///
/// Falls back to `cfscan=info` plus `cfscan_analysis=info` if `CFSCAN_LOG`
/// is not set or is invalid. Logs go to stderr so report output on stdout
/// stays clean.
///
/// Idempotent; later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("cfscan=info,cfscan_analysis=info,cfscan_core=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
