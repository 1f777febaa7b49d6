//! Command lines produced by wrappers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A fully resolved invocation of an external binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    /// Executable name, looked up on `PATH`
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Payload written to the child's stdin, which is then closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
    /// File that receives the child's stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout_file: Option<PathBuf>,
    /// Run under `sudo`
    #[serde(default)]
    pub privileged: bool,
}

impl CommandLine {
    /// Create a command line for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: None,
            stdout_file: None,
            privileged: false,
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Feed `input` to the child's stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Capture stdout into `path`.
    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout_file = Some(path.into());
        self
    }

    /// Run under `sudo`.
    pub fn privileged(mut self) -> Self {
        self.privileged = true;
        self
    }

    /// The argv actually spawned, including the `sudo` prefix.
    pub fn argv(&self) -> Vec<&str> {
        let mut argv = Vec::with_capacity(self.args.len() + 2);
        if self.privileged {
            argv.push("sudo");
        }
        argv.push(self.program.as_str());
        argv.extend(self.args.iter().map(String::as_str));
        argv
    }
}

impl fmt::Display for CommandLine {
    /// Renders the equivalent shell pipeline, e.g.
    /// `echo http://box.htb | hakrawler -subs > ./box/hakrawler.json`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(input) = &self.stdin {
            write!(f, "echo {} | ", shell_words::quote(input))?;
        }
        f.write_str(&shell_words::join(self.argv()))?;
        if let Some(path) = &self.stdout_file {
            write!(f, " > {}", shell_words::quote(&path.to_string_lossy()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder() {
        let cmd = CommandLine::new("nmap").arg("-Pn").args(["-T5", "10.0.0.5"]);
        assert_eq!(cmd.program, "nmap");
        assert_eq!(cmd.args, vec!["-Pn", "-T5", "10.0.0.5"]);
        assert!(!cmd.privileged);
    }

    #[test]
    fn test_argv_with_sudo() {
        let cmd = CommandLine::new("nmap").arg("-Pn").privileged();
        assert_eq!(cmd.argv(), vec!["sudo", "nmap", "-Pn"]);
    }

    #[test]
    fn test_display_pipeline() {
        let cmd = CommandLine::new("hakrawler")
            .arg("-subs")
            .stdin("http://box.htb")
            .stdout_to("./box/hakrawler.json");
        assert_eq!(
            cmd.to_string(),
            "echo http://box.htb | hakrawler -subs > ./box/hakrawler.json"
        );
    }

    #[test]
    fn test_display_quotes_unsafe_words() {
        let cmd = CommandLine::new("ffuf").args(["-H", "Host: FUZZ", "it's"]);
        assert_eq!(cmd.to_string(), r"ffuf -H 'Host: FUZZ' 'it'\''s'");
    }

    #[test]
    fn test_display_quotes_redirect_target() {
        let cmd = CommandLine::new("id")
            .arg("kali")
            .stdout_to("./my box/id.txt");
        assert_eq!(cmd.to_string(), "id kali > './my box/id.txt'");
    }

    #[test]
    fn test_display_round_trips_through_shell_split() {
        let cmd = CommandLine::new("ffuf")
            .args(["-H", "Host: FUZZ.box.htb", "-mc", "all"])
            .privileged();
        let words = shell_words::split(&cmd.to_string()).unwrap();
        assert_eq!(words, cmd.argv());
    }

    #[test]
    fn test_display_quotes_empty_word() {
        let cmd = CommandLine::new("id").arg("");
        assert_eq!(cmd.to_string(), "id ''");
    }
}
