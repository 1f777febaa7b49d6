//! Settings and tool runner for recon
//!
//! This crate sits between the tool catalog and the command line:
//!
//! - **Settings**: the target description, loaded from `recon.toml` and
//!   overlaid with the environment variables the scanning workflow exports
//! - **Runner**: binary availability checks, child-process execution and the
//!   phased scan pipeline that writes a JSON run summary
//! - **Bruteforce**: hydra command construction for a web login form
//! - **Logging**: `tracing` subscriber setup shared by the binaries
//!
//! # Architecture
//!
//! ```text
//!          recon-cli
//!              |
//!         recon-core
//!        /          \
//!    config        runner
//!        \          /
//!         recon-tools
//! ```

pub mod bruteforce;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;

pub use config::Settings;
pub use error::{Error, Result};
pub use runner::{
    CommandExecutor, Execution, PipelineOptions, ProcessExecutor, RunSummary, ScanPipeline, Tally,
    ToolOutcome, ToolRun,
};
