//! Show command: one descriptor in detail

use colored::Colorize;
use recon_tools::{TargetContext, ToolDescriptor, ToolRegistry};

use crate::error::Result;

/// Run the show command
pub fn run_show(name: &str) -> Result<()> {
    let registry = ToolRegistry::with_builtins();
    let tool = registry
        .find(name)
        .ok_or_else(|| recon_tools::Error::UnknownTool(name.to_string()))?;

    println!("{}", tool.name.green().bold());
    println!("  {:<10} {}", "category".dimmed(), tool.category.label());
    println!("  {:<10} {}", "binary".dimmed(), tool.binary);
    println!("  {:<10} ({})", "args".dimmed(), arg_names(tool).join(", "));
    if tool.is_privileged() {
        println!("  {:<10} runs under sudo", "privilege".dimmed());
    }
    if tool.yields_ports {
        println!("  {:<10} feeds open ports to later tools", "ports".dimmed());
    }
    println!("  {:<10} {}", "example".dimmed(), example_command(tool)?);

    Ok(())
}

fn arg_names(tool: &ToolDescriptor) -> Vec<&'static str> {
    tool.args.iter().map(|a| a.as_str()).collect()
}

/// The command line with `<name>` placeholders for every value.
fn example_command(tool: &ToolDescriptor) -> Result<String> {
    Ok(tool.bind(&TargetContext::placeholders())?.to_string())
}
