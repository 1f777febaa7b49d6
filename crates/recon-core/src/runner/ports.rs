//! Open-port extraction from port discovery output

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// rustscan `--greppable`: `10.0.0.5 -> [22,80,443]`
static GREPPABLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+\s+->\s+\[([\d,\s]*)\]").unwrap());

/// Grepable port entries: `22/open/tcp//ssh///`
static OPEN_ENTRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,5})/open/").unwrap());

/// Open ports found in `output`, sorted and de-duplicated.
pub fn parse_open_ports(output: &str) -> Vec<u16> {
    let mut ports = BTreeSet::new();

    for line in output.lines() {
        let line = line.trim();
        if let Some(caps) = GREPPABLE_LINE.captures(line) {
            ports.extend(
                caps[1]
                    .split(',')
                    .filter_map(|p| p.trim().parse::<u16>().ok()),
            );
            continue;
        }
        ports.extend(
            OPEN_ENTRY
                .captures_iter(line)
                .filter_map(|c| c[1].parse::<u16>().ok()),
        );
    }

    ports.into_iter().filter(|p| *p != 0).collect()
}

/// Comma-separated list as passed to `nmap -p`.
pub fn join_ports(ports: &[u16]) -> String {
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
