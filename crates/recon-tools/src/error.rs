//! Error types for recon-tools

use crate::context::ArgSource;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tool {tool} needs {arg}, which is not set")]
    MissingValue { tool: String, arg: ArgSource },

    #[error("Wrapper for {tool} rejected {given} argument(s)")]
    HandlerRejected { tool: String, given: usize },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown category '{0}'. Valid: network-ports, network-services, web, web-advanced, os-linux")]
    UnknownCategory(String),
}
