//! cfscan-core: shared foundation for the cfscan analysis engine.
//!
//! - Config: TOML-based, layered resolution (CLI > env > project > defaults)
//! - Errors: one `thiserror` enum per subsystem, aggregated by `PipelineError`
//! - Events: `AnalysisEventHandler` with no-op defaults
//! - Cancellation: shared cooperative cancel flag
//! - Tracing: `CFSCAN_LOG`-driven subscriber setup

pub mod cancellation;
pub mod config;
pub mod errors;
pub mod events;
pub mod tracing;

pub use cancellation::CancellationToken;
pub use config::{AnalysisConfig, CfscanConfig, ScanConfig};
pub use errors::{PipelineError, ScanError};
pub use events::AnalysisEventHandler;
