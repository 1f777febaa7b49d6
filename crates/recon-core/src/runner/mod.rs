//! Tool runner
//!
//! Turns catalog descriptors into child processes:
//!
//! - [`availability`] finds binaries missing from `PATH`
//! - [`executor`] spawns one command line and captures its output
//! - [`ports`] reads the open-port list out of port discovery output
//! - [`pipeline`] walks the phases and records a [`RunSummary`]

pub mod availability;
pub mod executor;
pub mod pipeline;
pub mod ports;
pub mod report;

pub use availability::missing_binaries;
pub use executor::{CommandExecutor, Execution, ProcessExecutor};
pub use pipeline::{DEFAULT_PHASES, PipelineOptions, ScanPipeline, StartHook};
pub use ports::parse_open_ports;
pub use report::{RunSummary, SUMMARY_FILE, Tally, ToolOutcome, ToolRun};
