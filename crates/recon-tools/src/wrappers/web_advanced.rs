//! Active web vulnerability scanners

use super::output_path;
use crate::command::CommandLine;

/// Values: resources_dir, url.
pub fn wapiti(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("wapiti")
            .arg("-u")
            .arg(url)
            .args(["-f", "json", "-o"])
            .arg(output_path(out, "wapiti.json")),
    )
}

/// Values: resources_dir, url.
pub fn nuclei(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("nuclei")
            .arg("-u")
            .arg(url)
            .args(["-jsonl", "-o"])
            .arg(output_path(out, "nuclei.jsonl")),
    )
}

/// HTTP parameter discovery.
///
/// Values: resources_dir, url.
pub fn arjun(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("arjun")
            .arg("-u")
            .arg(url)
            .arg("-oJ")
            .arg(output_path(out, "arjun.json")),
    )
}

/// Server-side template injection probing of crawled forms.
///
/// Values: resources_dir, url.
pub fn sstimap(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("sstimap")
            .arg("-u")
            .arg(url)
            .args(["--crawl", "2", "--forms"])
            .stdout_to(output_path(out, "sstimap.txt")),
    )
}

/// XSS scanning.
///
/// Values: resources_dir, url.
pub fn dalfox(args: &[String]) -> Option<CommandLine> {
    let [out, url] = args else {
        return None;
    };
    Some(
        CommandLine::new("dalfox")
            .arg("url")
            .arg(url)
            .args(["--format", "json", "-o"])
            .arg(output_path(out, "dalfox.json")),
    )
}
