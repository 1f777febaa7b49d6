//! Core types for the tool catalog

use crate::command::CommandLine;
use crate::context::{ArgSource, TargetContext};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wrapper function for one tool.
///
/// Receives the resolved values in tuple order and returns the command line,
/// or `None` when the number of values does not match its arity.
pub type Handler = fn(&[String]) -> Option<CommandLine>;

/// Reconnaissance phase a tool belongs to.
///
/// Variants are declared in phase order, so sorting by category yields the
/// order an orchestrator runs them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolCategory {
    /// Port discovery (rustscan, nmap)
    NetworkPorts,
    /// Network service enumeration (SMB and friends)
    NetworkServices,
    /// Web content and technology discovery
    Web,
    /// Active web vulnerability scanners
    WebAdvanced,
    /// Local enumeration on a Linux foothold
    OsLinux,
}

impl ToolCategory {
    /// All categories in phase order.
    pub const ALL: [ToolCategory; 5] = [
        ToolCategory::NetworkPorts,
        ToolCategory::NetworkServices,
        ToolCategory::Web,
        ToolCategory::WebAdvanced,
        ToolCategory::OsLinux,
    ];

    /// Machine identifier (e.g., "network-ports").
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::NetworkPorts => "network-ports",
            ToolCategory::NetworkServices => "network-services",
            ToolCategory::Web => "web",
            ToolCategory::WebAdvanced => "web-advanced",
            ToolCategory::OsLinux => "os-linux",
        }
    }

    /// Heading used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            ToolCategory::NetworkPorts => "Network Ports",
            ToolCategory::NetworkServices => "Network Services",
            ToolCategory::Web => "Web",
            ToolCategory::WebAdvanced => "Web (Advanced)",
            ToolCategory::OsLinux => "OS (Linux)",
        }
    }

    /// Parse a category name. Accepts short aliases and underscores.
    pub fn parse(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "network-ports" | "ports" => Ok(ToolCategory::NetworkPorts),
            "network-services" | "services" => Ok(ToolCategory::NetworkServices),
            "web" => Ok(ToolCategory::Web),
            "web-advanced" => Ok(ToolCategory::WebAdvanced),
            "os-linux" | "linux" => Ok(ToolCategory::OsLinux),
            _ => Err(Error::UnknownCategory(name.to_string())),
        }
    }

    /// Whether tools in this category target a web server.
    pub fn is_web(&self) -> bool {
        matches!(self, ToolCategory::Web | ToolCategory::WebAdvanced)
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A catalog entry: tool name, wrapper and argument tuple.
#[derive(Clone)]
pub struct ToolDescriptor {
    /// Identifier, unique within its category (e.g., "ffuf-vhosts")
    pub name: String,
    /// Executable the wrapper drives (e.g., "ffuf")
    pub binary: String,
    /// Phase the tool runs in
    pub category: ToolCategory,
    /// Wrapper that builds the command line
    pub handler: Handler,
    /// Ambient values passed to the wrapper, in order
    pub args: Vec<ArgSource>,
    /// The tool's output lists open ports
    pub yields_ports: bool,
}

impl ToolDescriptor {
    /// Create a new descriptor.
    pub fn new(
        name: impl Into<String>,
        binary: impl Into<String>,
        category: ToolCategory,
        handler: Handler,
        args: impl Into<Vec<ArgSource>>,
    ) -> Self {
        Self {
            name: name.into(),
            binary: binary.into(),
            category,
            handler,
            args: args.into(),
            yields_ports: false,
        }
    }

    /// Mark the tool as the port discovery step (builder pattern).
    pub fn with_port_output(mut self) -> Self {
        self.yields_ports = true;
        self
    }

    /// Check if the tuple needs a given source.
    pub fn needs(&self, source: ArgSource) -> bool {
        self.args.contains(&source)
    }

    /// Whether the wrapper runs the tool under `sudo`.
    pub fn is_privileged(&self) -> bool {
        self.bind(&TargetContext::placeholders())
            .is_ok_and(|cmd| cmd.privileged)
    }

    /// Resolve the tuple against `ctx` and hand it to the wrapper.
    pub fn bind(&self, ctx: &TargetContext) -> Result<CommandLine> {
        let values = self
            .args
            .iter()
            .map(|&source| {
                ctx.get(source)
                    .map(str::to_string)
                    .ok_or_else(|| Error::MissingValue {
                        tool: self.name.clone(),
                        arg: source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(tool = %self.name, args = ?values, "Binding tool");

        (self.handler)(&values).ok_or_else(|| Error::HandlerRejected {
            tool: self.name.clone(),
            given: values.len(),
        })
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("binary", &self.binary)
            .field("category", &self.category)
            .field("args", &self.args)
            .field("yields_ports", &self.yields_ports)
            .finish_non_exhaustive()
    }
}

/// A tool that has a slot in the catalog but no wrapper yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedTool {
    pub name: &'static str,
    pub category: ToolCategory,
}
