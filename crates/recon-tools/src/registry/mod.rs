//! Tool catalog - single source of truth for what can be run.
//!
//! Descriptors are grouped by [`ToolCategory`]; each category keeps its
//! entries in insertion order.

mod builtins;
mod store;
mod types;

pub use builtins::{BUILTIN_COUNT, builtin_registrations, planned_tools};
pub use store::ToolRegistry;
pub use types::{Handler, PlannedTool, ToolCategory, ToolDescriptor};
