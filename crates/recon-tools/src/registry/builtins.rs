//! Built-in tool table
//!
//! Every tool the orchestrator knows how to run is declared here, grouped by
//! phase. Listing, lookup, binary checks and execution all derive from this
//! table.

use super::{PlannedTool, ToolCategory, ToolDescriptor};
use crate::context::ArgSource::{
    CurrentUser, DirWordlist, DnsWordlist, DomainName, IpAddress, OpenPorts, OsUser,
    ResourcesDir, Url,
};
use crate::wrappers::{linux, network, web, web_advanced};

/// Number of built-in tools.
pub const BUILTIN_COUNT: usize = 19;

/// Returns all built-in tool descriptors, in phase order.
pub fn builtin_registrations() -> Vec<ToolDescriptor> {
    use ToolCategory::*;

    vec![
        // Network ports (2 tools)
        ToolDescriptor::new(
            "rustscan",
            "rustscan",
            NetworkPorts,
            network::rustscan,
            [ResourcesDir, IpAddress],
        )
        .with_port_output(),
        ToolDescriptor::new(
            "nmap",
            "nmap",
            NetworkPorts,
            network::nmap,
            [ResourcesDir, IpAddress, OpenPorts],
        ),
        // Network services (2 tools)
        ToolDescriptor::new(
            "enum4linux-ng",
            "enum4linux-ng",
            NetworkServices,
            network::enum4linux_ng,
            [ResourcesDir, IpAddress],
        ),
        ToolDescriptor::new(
            "smbclient",
            "smbclient",
            NetworkServices,
            network::smbclient,
            [ResourcesDir, IpAddress, CurrentUser],
        ),
        // Web (7 tools)
        ToolDescriptor::new(
            "feroxbuster",
            "feroxbuster",
            Web,
            web::feroxbuster,
            [ResourcesDir, Url, DirWordlist],
        ),
        ToolDescriptor::new(
            "hakrawler",
            "hakrawler",
            Web,
            web::hakrawler,
            [ResourcesDir, Url],
        ),
        ToolDescriptor::new(
            "ffuf-vhosts",
            "ffuf",
            Web,
            web::ffuf_vhosts,
            [ResourcesDir, Url, DnsWordlist],
        ),
        ToolDescriptor::new(
            "ffuf-subdomains",
            "ffuf",
            Web,
            web::ffuf_subdomains,
            [ResourcesDir, Url, DomainName, DnsWordlist],
        ),
        ToolDescriptor::new("wafw00f", "wafw00f", Web, web::wafw00f, [ResourcesDir, Url]),
        ToolDescriptor::new("whatweb", "whatweb", Web, web::whatweb, [ResourcesDir, Url]),
        ToolDescriptor::new("nikto", "nikto", Web, web::nikto, [ResourcesDir, Url]),
        // Web advanced (5 tools)
        ToolDescriptor::new(
            "wapiti",
            "wapiti",
            WebAdvanced,
            web_advanced::wapiti,
            [ResourcesDir, Url],
        ),
        ToolDescriptor::new(
            "nuclei",
            "nuclei",
            WebAdvanced,
            web_advanced::nuclei,
            [ResourcesDir, Url],
        ),
        ToolDescriptor::new(
            "arjun",
            "arjun",
            WebAdvanced,
            web_advanced::arjun,
            [ResourcesDir, Url],
        ),
        ToolDescriptor::new(
            "sstimap",
            "sstimap",
            WebAdvanced,
            web_advanced::sstimap,
            [ResourcesDir, Url],
        ),
        ToolDescriptor::new(
            "dalfox",
            "dalfox",
            WebAdvanced,
            web_advanced::dalfox,
            [ResourcesDir, Url],
        ),
        // OS Linux (3 tools)
        ToolDescriptor::new(
            "sudo-rights",
            "sudo",
            OsLinux,
            linux::sudo_rights,
            [ResourcesDir, CurrentUser],
        ),
        ToolDescriptor::new(
            "account-info",
            "id",
            OsLinux,
            linux::account_info,
            [ResourcesDir, OsUser],
        ),
        ToolDescriptor::new(
            "suid-binaries",
            "find",
            OsLinux,
            linux::suid_binaries,
            [ResourcesDir],
        ),
    ]
}

/// Tools with a reserved slot but no wrapper yet.
pub fn planned_tools() -> &'static [PlannedTool] {
    const PLANNED: &[PlannedTool] = &[
        PlannedTool {
            name: "snmpwalk",
            category: ToolCategory::NetworkServices,
        },
        PlannedTool {
            name: "ldapsearch",
            category: ToolCategory::NetworkServices,
        },
        PlannedTool {
            name: "gobuster",
            category: ToolCategory::Web,
        },
        PlannedTool {
            name: "wpscan",
            category: ToolCategory::Web,
        },
        PlannedTool {
            name: "sqlmap",
            category: ToolCategory::WebAdvanced,
        },
        PlannedTool {
            name: "commix",
            category: ToolCategory::WebAdvanced,
        },
        PlannedTool {
            name: "linpeas",
            category: ToolCategory::OsLinux,
        },
        PlannedTool {
            name: "pspy",
            category: ToolCategory::OsLinux,
        },
    ];
    PLANNED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ArgSource, TargetContext};
    use std::collections::HashSet;

    fn full_context() -> TargetContext {
        ArgSource::ALL
            .into_iter()
            .fold(TargetContext::new(), |ctx, source| {
                ctx.with(source, format!("<{}>", source))
            })
    }

    #[test]
    fn test_builtin_count() {
        assert_eq!(builtin_registrations().len(), BUILTIN_COUNT);
    }

    #[test]
    fn test_no_duplicate_names_within_category() {
        let regs = builtin_registrations();
        let keys: HashSet<_> = regs.iter().map(|r| (r.category, r.name.as_str())).collect();
        assert_eq!(keys.len(), BUILTIN_COUNT, "Duplicate names found");
    }

    #[test]
    fn test_all_expected_tools_present() {
        let regs = builtin_registrations();
        let names: HashSet<_> = regs.iter().map(|r| r.name.as_str()).collect();

        for expected in [
            "rustscan",
            "nmap",
            "enum4linux-ng",
            "smbclient",
            "feroxbuster",
            "hakrawler",
            "ffuf-vhosts",
            "ffuf-subdomains",
            "wafw00f",
            "whatweb",
            "nikto",
            "wapiti",
            "nuclei",
            "arjun",
            "sstimap",
            "dalfox",
        ] {
            assert!(names.contains(expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_category_counts() {
        let regs = builtin_registrations();
        let count = |cat: ToolCategory| regs.iter().filter(|r| r.category == cat).count();

        assert_eq!(count(ToolCategory::NetworkPorts), 2);
        assert_eq!(count(ToolCategory::NetworkServices), 2);
        assert_eq!(count(ToolCategory::Web), 7);
        assert_eq!(count(ToolCategory::WebAdvanced), 5);
        assert_eq!(count(ToolCategory::OsLinux), 3);
    }

    #[test]
    fn test_table_is_in_phase_order() {
        let cats: Vec<_> = builtin_registrations().iter().map(|r| r.category).collect();
        let mut sorted = cats.clone();
        sorted.sort();
        assert_eq!(cats, sorted);
    }

    #[test]
    fn test_every_tool_binds_against_full_context() {
        let ctx = full_context();
        for reg in builtin_registrations() {
            let cmd = reg
                .bind(&ctx)
                .unwrap_or_else(|e| panic!("{} failed to bind: {}", reg.name, e));
            assert_eq!(cmd.program, reg.binary, "binary mismatch for {}", reg.name);
        }
    }

    #[test]
    fn test_every_tool_takes_resources_dir_first() {
        for reg in builtin_registrations() {
            assert_eq!(
                reg.args.first(),
                Some(&ArgSource::ResourcesDir),
                "{} does not start with resources_dir",
                reg.name
            );
        }
    }

    #[test]
    fn test_only_rustscan_yields_ports() {
        let port_tools: Vec<_> = builtin_registrations()
            .into_iter()
            .filter(|r| r.yields_ports)
            .map(|r| r.name)
            .collect();
        assert_eq!(port_tools, vec!["rustscan"]);
    }

    #[test]
    fn test_only_nmap_runs_privileged() {
        let privileged: Vec<_> = builtin_registrations()
            .into_iter()
            .filter(|r| r.is_privileged())
            .map(|r| r.name)
            .collect();
        assert_eq!(privileged, vec!["nmap"]);
    }

    #[test]
    fn test_planned_tools_are_not_registered() {
        let regs = builtin_registrations();
        for planned in planned_tools() {
            assert!(
                !regs
                    .iter()
                    .any(|r| r.category == planned.category && r.name == planned.name),
                "{} is both planned and registered",
                planned.name
            );
        }
    }
}
