//! List command for the tool catalog

use colored::Colorize;
use recon_tools::{ToolCategory, ToolRegistry, planned_tools};

use crate::error::Result;

/// Run the list-tools command
pub fn run_list_tools(category_filter: Option<&str>) -> Result<()> {
    let registry = ToolRegistry::with_builtins();

    let filter = match category_filter.map(ToolCategory::parse) {
        Some(Ok(cat)) => Some(cat),
        Some(Err(e)) => {
            eprintln!("{} {}", "warning:".yellow().bold(), e);
            None
        }
        None => None,
    };

    println!("{}", "Available Tools".bold());
    println!();

    let planned = planned_tools();

    for cat in ToolCategory::ALL {
        if filter.is_some_and(|f| f != cat) {
            continue;
        }

        let tools = registry.by_category(cat);
        if tools.is_empty() {
            continue;
        }

        println!("{}:", cat.label().cyan().bold());
        for tool in tools {
            let args: Vec<&str> = tool.args.iter().map(|a| a.as_str()).collect();
            println!(
                "  {:<16} {:<14} ({})",
                tool.name.green(),
                tool.binary,
                args.join(", ").dimmed()
            );
        }

        let pending: Vec<&str> = planned
            .iter()
            .filter(|p| p.category == cat)
            .map(|p| p.name)
            .collect();
        if !pending.is_empty() {
            println!("  {} {}", "planned:".dimmed(), pending.join(", ").dimmed());
        }
        println!();
    }

    println!(
        "{} {} tools available. Use {} for details.",
        "Total:".dimmed(),
        registry.len(),
        "recon show <name>".cyan()
    );

    Ok(())
}
