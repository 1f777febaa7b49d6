//! Child-process execution of bound command lines

use async_trait::async_trait;
use recon_tools::CommandLine;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Captured result of one finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    /// Exit code; `None` when the child was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Execution {
    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Last non-empty stderr line, for one-line failure reports.
    pub fn stderr_tail(&self) -> Option<&str> {
        self.stderr
            .lines()
            .rev()
            .map(str::trim)
            .find(|l| !l.is_empty())
    }
}

/// Runs a command line to completion.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute `cmd` and capture its output.
    ///
    /// A non-zero exit is not an error; only failing to start the process is.
    async fn execute(&self, cmd: &CommandLine) -> Result<Execution>;
}

/// Executes commands as local child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(&self, cmd: &CommandLine) -> Result<Execution> {
        let argv = cmd.argv();
        let (program, args) = argv.split_first().ok_or_else(|| Error::Spawn {
            program: cmd.program.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line"),
        })?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if cmd.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(command = %cmd, "Spawning");

        let mut child = command.spawn().map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;

        if let (Some(input), Some(mut stdin)) = (&cmd.stdin, child.stdin.take()) {
            let payload = format!("{input}\n");
            match stdin.write_all(payload.as_bytes()).await {
                // The child closed stdin early; its exit status tells the story.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    tracing::debug!(command = %cmd, "Child closed stdin before reading input");
                }
                result => result?,
            }
            // Dropping stdin closes the pipe so the child sees EOF.
        }

        let output = child.wait_with_output().await?;
        let execution = Execution {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if let Some(path) = &cmd.stdout_file {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, &output.stdout).await?;
        }

        Ok(execution)
    }
}
