//! Run summary written at the end of a scan

use chrono::{DateTime, Utc};
use recon_tools::ToolCategory;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name of the summary inside the resources directory.
pub const SUMMARY_FILE: &str = "recon-summary.json";

/// What happened to one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolOutcome {
    /// Exited with status 0
    Completed { exit_code: i32 },
    /// Exited non-zero, was killed, or could not be started
    Failed {
        exit_code: Option<i32>,
        message: String,
    },
    /// Not run; `reason` says why
    Skipped { reason: String },
    /// Dry run: would have been executed
    Planned,
}

impl ToolOutcome {
    /// Short label for terminal output.
    pub fn label(&self) -> &'static str {
        match self {
            ToolOutcome::Completed { .. } => "done",
            ToolOutcome::Failed { .. } => "failed",
            ToolOutcome::Skipped { .. } => "skipped",
            ToolOutcome::Planned => "planned",
        }
    }
}

/// Record of one tool in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRun {
    pub tool: String,
    pub category: ToolCategory,
    /// Rendered command line; absent when the tool could not be bound
    pub command: Option<String>,
    pub outcome: ToolOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Number of runs per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub completed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub planned: usize,
}

/// Everything a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Target name (the resources directory name)
    pub target: String,
    pub resources_dir: PathBuf,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Ports found by port discovery, if it ran
    pub open_ports: Vec<u16>,
    pub runs: Vec<ToolRun>,
}

impl RunSummary {
    /// Count the runs by outcome.
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for run in &self.runs {
            match run.outcome {
                ToolOutcome::Completed { .. } => tally.completed += 1,
                ToolOutcome::Failed { .. } => tally.failed += 1,
                ToolOutcome::Skipped { .. } => tally.skipped += 1,
                ToolOutcome::Planned => tally.planned += 1,
            }
        }
        tally
    }

    /// Find the record for a tool.
    pub fn run(&self, tool: &str) -> Option<&ToolRun> {
        self.runs.iter().find(|r| r.tool == tool)
    }

    /// Whether any tool failed.
    pub fn has_failures(&self) -> bool {
        self.tally().failed > 0
    }

    /// Write the summary as pretty JSON into `dir`, returning the file path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(SUMMARY_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> RunSummary {
        let now = Utc::now();
        let run = |tool: &str, outcome: ToolOutcome| ToolRun {
            tool: tool.into(),
            category: ToolCategory::Web,
            command: Some(format!("{tool} -h")),
            outcome,
            started_at: now,
            finished_at: now,
        };
        RunSummary {
            target: "box".into(),
            resources_dir: PathBuf::from("./box"),
            dry_run: false,
            started_at: now,
            finished_at: now,
            open_ports: vec![22, 80],
            runs: vec![
                run("nikto", ToolOutcome::Completed { exit_code: 0 }),
                run(
                    "whatweb",
                    ToolOutcome::Failed {
                        exit_code: Some(1),
                        message: "boom".into(),
                    },
                ),
                run(
                    "wafw00f",
                    ToolOutcome::Skipped {
                        reason: "no web ports".into(),
                    },
                ),
            ],
        }
    }

    #[test]
    fn test_tally() {
        let summary = sample();
        assert_eq!(
            summary.tally(),
            Tally {
                completed: 1,
                failed: 1,
                skipped: 1,
                planned: 0
            }
        );
        assert!(summary.has_failures());
        assert_eq!(summary.run("nikto").unwrap().outcome.label(), "done");
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_value(ToolOutcome::Skipped {
            reason: "no web ports".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "status": "skipped", "reason": "no web ports" })
        );

        let json = serde_json::to_value(ToolOutcome::Planned).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "planned" }));
    }

    #[test]
    fn test_write_to() {
        let temp = TempDir::new().unwrap();
        let summary = sample();

        let path = summary.write_to(temp.path()).unwrap();
        assert_eq!(path, temp.path().join(SUMMARY_FILE));

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: RunSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.target, "box");
        assert_eq!(parsed.runs.len(), 3);
        assert!(content.contains("\"category\": \"web\""));
    }
}
