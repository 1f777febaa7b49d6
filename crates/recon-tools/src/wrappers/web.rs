//! Web content and technology discovery

use super::output_path;
use crate::command::CommandLine;

/// Recursive directory brute force.
///
/// Values: resources_dir, url, fuzzwordlistdir.
pub fn feroxbuster(args: &[String]) -> Option<CommandLine> {
    let [out, url, wordlist] = args else {
        return None;
    };
    Some(
        CommandLine::new("feroxbuster")
            .arg("-w")
            .arg(wordlist)
            .arg("-u")
            .arg(url)
            .args([
                "-C",
                "404",
                "--auto-bail",
                "--no-state",
                "--extract-links",
                "--collect-words",
                "--collect-backups",
                "--collect-extensions",
                "-k",
                "-o",
            ])
            .arg(output_path(out, "feroxbuster.txt")),
    )
}

/// Crawler; reads the start URL from stdin.
///
/// Values: resources_dir, url.
pub fn hakrawler(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("hakrawler")
            .args(["-subs", "-u", "-dr", "-insecure", "-json"])
            .stdin(url)
            .stdout_to(output_path(out, "hakrawler.json")),
    )
}

/// Virtual-host fuzzing through the `Host` header.
///
/// Values: resources_dir, url, fuzzwordlistdns.
pub fn ffuf_vhosts(args: &[String]) -> Option<CommandLine> {
    let [out, url, wordlist] = args else {
        return None;
    };
    Some(
        CommandLine::new("ffuf")
            .arg("-u")
            .arg(url)
            .args(["-H", "Host:FUZZ", "-w"])
            .arg(wordlist)
            .args(["-ac", "-c", "-mc", "all", "-fc", "400", "-or", "-o"])
            .arg(output_path(out, "vhosts.txt")),
    )
}

/// Subdomain fuzzing against `FUZZ.<domain>`.
///
/// Values: resources_dir, url, domain_name, fuzzwordlistdns.
pub fn ffuf_subdomains(args: &[String]) -> Option<CommandLine> {
    let [out, url, domain, wordlist] = args else {
        return None;
    };
    Some(
        CommandLine::new("ffuf")
            .arg("-H")
            .arg(format!("Host:FUZZ.{domain}"))
            .arg("-u")
            .arg(url)
            .arg("-w")
            .arg(wordlist)
            .args(["-ac", "-c", "-ic", "-mc", "all", "-or", "-o"])
            .arg(output_path(out, "subdomains.txt")),
    )
}

/// Web application firewall fingerprinting.
///
/// Values: resources_dir, url.
pub fn wafw00f(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("wafw00f")
            .arg(url)
            .args(["-f", "json", "-o"])
            .arg(output_path(out, "wafw00f.json")),
    )
}

/// Values: resources_dir, url.
pub fn whatweb(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("whatweb")
            .args(["-a", "3"])
            .arg(format!("--log-json={}", output_path(out, "whatweb.json")))
            .arg(url),
    )
}

/// Values: resources_dir, url.
pub fn nikto(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("nikto")
            .arg("-h")
            .arg(url)
            .args(["-Format", "txt", "-o"])
            .arg(output_path(out, "nikto.txt")),
    )
}
