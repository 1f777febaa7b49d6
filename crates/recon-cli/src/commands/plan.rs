//! Plan command: bind every tool against the resolved settings

use std::path::Path;

use colored::Colorize;
use recon_core::{
    PipelineOptions, ProcessExecutor, RunSummary, ScanPipeline, Settings, ToolOutcome,
};
use recon_tools::ToolRegistry;

use super::{block_on, selected_categories};
use crate::error::Result;

/// Run the plan command
///
/// Nothing is executed and no directory is created. Unlike `run`, missing
/// target values are reported per tool instead of aborting.
pub fn run_plan(config: Option<&Path>, category: Option<&str>, json: bool) -> Result<()> {
    let settings = Settings::resolve(config)?;
    let summary = plan(&settings, category)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary.runs)?);
        return Ok(());
    }

    print_plan(&summary);
    Ok(())
}

/// Dry-run the pipeline over the selected categories.
fn plan(settings: &Settings, category: Option<&str>) -> Result<RunSummary> {
    let registry = ToolRegistry::with_builtins();
    let options = PipelineOptions::default()
        .with_phases(selected_categories(category)?)
        .dry_run(true);
    let pipeline = ScanPipeline::new(&registry, ProcessExecutor::new(), options);

    Ok(block_on(pipeline.run(settings))??)
}

fn print_plan(summary: &RunSummary) {
    println!(
        "{} Plan for {} ({})",
        "=>".blue().bold(),
        summary.target.cyan(),
        summary.resources_dir.display()
    );

    let mut current = None;
    for run in &summary.runs {
        if current != Some(run.category) {
            println!();
            println!("{}:", run.category.label().cyan().bold());
            current = Some(run.category);
        }
        match (&run.outcome, &run.command) {
            (ToolOutcome::Planned, Some(command)) => {
                println!("  {:<16} {}", run.tool.green(), command)
            }
            (ToolOutcome::Skipped { reason }, _) => {
                println!("  {:<16} {} {}", run.tool.yellow(), "skipped:".yellow(), reason)
            }
            (outcome, _) => println!("  {:<16} {}", run.tool, outcome.label()),
        }
    }

    let tally = summary.tally();
    println!();
    println!(
        "{} {} planned, {} skipped",
        "Total:".dimmed(),
        tally.planned,
        tally.skipped
    );
}
