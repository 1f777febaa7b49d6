//! Run command: execute the scan pipeline against the configured target

use std::path::Path;

use colored::Colorize;
use recon_core::runner::{DEFAULT_PHASES, SUMMARY_FILE, missing_binaries};
use recon_core::{
    PipelineOptions, ProcessExecutor, RunSummary, ScanPipeline, Settings, ToolOutcome,
};
use recon_tools::{ToolCategory, ToolRegistry};

use super::block_on;
use crate::error::Result;

/// Flags of the run command
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub phases: Vec<String>,
    pub advanced: bool,
    pub dry_run: bool,
    pub skip_missing: bool,
}

impl RunArgs {
    /// Phases to run, in phase order.
    pub fn categories(&self) -> Result<Vec<ToolCategory>> {
        let mut phases = self
            .phases
            .iter()
            .map(|p| ToolCategory::parse(p))
            .collect::<recon_tools::Result<Vec<_>>>()?;
        if phases.is_empty() {
            phases = DEFAULT_PHASES.to_vec();
        }
        if self.advanced {
            phases.push(ToolCategory::WebAdvanced);
        }
        phases.sort();
        phases.dedup();
        Ok(phases)
    }
}

/// Run the run command
pub fn run_scan(config: Option<&Path>, args: &RunArgs) -> Result<()> {
    let settings = Settings::resolve(config)?;
    settings.require_target()?;

    let phases = args.categories()?;
    let registry = ToolRegistry::with_builtins();

    let missing = if args.dry_run {
        Vec::new()
    } else {
        missing_binaries(registry.binaries(&phases))
    };
    if !missing.is_empty() && !args.skip_missing {
        return Err(recon_core::Error::MissingBinaries { names: missing }.into());
    }

    let labels: Vec<&str> = phases.iter().map(|p| p.as_str()).collect();
    println!(
        "{} Scanning {} ({}) phases: {}",
        "=>".blue().bold(),
        settings.target.name.as_deref().unwrap_or_default().cyan(),
        settings.target.ip.as_deref().unwrap_or_default(),
        labels.join(", ")
    );
    if !missing.is_empty() {
        println!(
            "{} Skipping tools for missing binaries: {}",
            "WARN".yellow().bold(),
            missing.join(", ")
        );
    }

    let options = PipelineOptions::default()
        .with_phases(phases)
        .dry_run(args.dry_run)
        .skip_binaries(missing);
    let pipeline = ScanPipeline::new(&registry, ProcessExecutor::new(), options).on_tool_start(
        |desc, cmd| {
            println!("{} Running {}: {}", "=>".blue().bold(), desc.name.cyan(), cmd);
        },
    );
    let summary = block_on(pipeline.run(&settings))??;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let tally = summary.tally();
    println!();
    for run in &summary.runs {
        let label = run.outcome.label();
        let (status, detail) = match &run.outcome {
            ToolOutcome::Completed { .. } => (label.green().bold(), String::new()),
            ToolOutcome::Failed { message, .. } => (label.red().bold(), message.clone()),
            ToolOutcome::Skipped { reason } => (label.yellow(), reason.clone()),
            ToolOutcome::Planned => (
                label.blue(),
                run.command.clone().unwrap_or_default(),
            ),
        };
        println!("  {:<16} {:<8} {}", run.tool, status, detail.dimmed());
    }

    println!();
    if !summary.open_ports.is_empty() {
        let ports: Vec<String> = summary.open_ports.iter().map(u16::to_string).collect();
        println!("{} {}", "Open ports:".dimmed(), ports.join(","));
    }

    if summary.dry_run {
        println!(
            "{} Dry run: {} commands planned, nothing executed.",
            "OK".green().bold(),
            tally.planned
        );
        return;
    }

    let status = if summary.has_failures() {
        "WARN".yellow().bold()
    } else {
        "OK".green().bold()
    };
    println!(
        "{} {} done, {} failed, {} skipped. Summary: {}",
        status,
        tally.completed,
        tally.failed,
        tally.skipped,
        summary.resources_dir.join(SUMMARY_FILE).display()
    );
}
