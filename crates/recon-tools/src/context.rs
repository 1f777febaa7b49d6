//! Ambient values that fill a descriptor's argument tuple

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Names one ambient variable a wrapper can receive positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgSource {
    /// Directory where every tool writes its output
    ResourcesDir,
    /// Target base URL (e.g., "http://box.htb")
    Url,
    /// Target IP address
    IpAddress,
    /// Target domain name used for virtual-host fuzzing
    DomainName,
    /// Wordlist for DNS / virtual-host fuzzing
    DnsWordlist,
    /// Wordlist for directory brute forcing
    DirWordlist,
    /// Local account the operator is running as
    CurrentUser,
    /// Account on the target operating system
    OsUser,
    /// Comma-separated open ports, known only after port discovery
    OpenPorts,
}

impl ArgSource {
    /// All sources, in declaration order.
    pub const ALL: [ArgSource; 9] = [
        ArgSource::ResourcesDir,
        ArgSource::Url,
        ArgSource::IpAddress,
        ArgSource::DomainName,
        ArgSource::DnsWordlist,
        ArgSource::DirWordlist,
        ArgSource::CurrentUser,
        ArgSource::OsUser,
        ArgSource::OpenPorts,
    ];

    /// Stable identifier used in listings and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgSource::ResourcesDir => "resources_dir",
            ArgSource::Url => "url",
            ArgSource::IpAddress => "ip_address",
            ArgSource::DomainName => "domain_name",
            ArgSource::DnsWordlist => "fuzzwordlistdns",
            ArgSource::DirWordlist => "fuzzwordlistdir",
            ArgSource::CurrentUser => "current_user",
            ArgSource::OsUser => "os_user",
            ArgSource::OpenPorts => "open_ports",
        }
    }
}

impl fmt::Display for ArgSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values available to bind descriptors against.
///
/// Built once from the resolved settings; the runner adds
/// [`ArgSource::OpenPorts`] after port discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetContext {
    values: HashMap<ArgSource, String>,
}

impl TargetContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every source set to `<name>`, for rendering example command lines.
    pub fn placeholders() -> Self {
        ArgSource::ALL
            .into_iter()
            .fold(Self::new(), |ctx, source| {
                ctx.with(source, format!("<{}>", source.as_str()))
            })
    }

    /// Set a value (builder pattern).
    pub fn with(mut self, source: ArgSource, value: impl Into<String>) -> Self {
        self.set(source, value);
        self
    }

    /// Set or replace a value.
    pub fn set(&mut self, source: ArgSource, value: impl Into<String>) {
        self.values.insert(source, value.into());
    }

    /// Look up a value.
    pub fn get(&self, source: ArgSource) -> Option<&str> {
        self.values.get(&source).map(String::as_str)
    }

    /// Check whether a value is set.
    pub fn contains(&self, source: ArgSource) -> bool {
        self.values.contains_key(&source)
    }

    /// Sources that have no value, in declaration order.
    pub fn missing(&self) -> Vec<ArgSource> {
        ArgSource::ALL
            .into_iter()
            .filter(|s| !self.contains(*s))
            .collect()
    }
}
