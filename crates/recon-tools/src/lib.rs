//! Tool catalog for recon.
//!
//! This crate maps human-readable tool names (`nmap`, `nikto`,
//! `feroxbuster`, ...) to a wrapper function and a fixed tuple of argument
//! sources, grouped by reconnaissance phase.
//!
//! # Architecture
//!
//! The catalog is declarative data:
//!
//! 1. **Descriptors** - A [`ToolDescriptor`] pairs a tool name with a
//!    [`Handler`] and the ordered [`ArgSource`]s that feed it.
//!
//! 2. **Wrappers** - Plain functions in [`wrappers`] that turn resolved
//!    positional values into a [`CommandLine`].
//!
//! 3. **Registry** - The [`ToolRegistry`] holds descriptors per
//!    [`ToolCategory`] in insertion order and is seeded from
//!    [`builtin_registrations`].
//!
//! Nothing in this crate executes a command. Binding a descriptor against a
//! [`TargetContext`] only produces the command line an orchestrator would run.

pub mod command;
pub mod context;
pub mod error;
pub mod registry;
pub mod wrappers;

pub use command::CommandLine;
pub use context::{ArgSource, TargetContext};
pub use error::{Error, Result};
pub use registry::{
    BUILTIN_COUNT, Handler, PlannedTool, ToolCategory, ToolDescriptor, ToolRegistry,
    builtin_registrations, planned_tools,
};
