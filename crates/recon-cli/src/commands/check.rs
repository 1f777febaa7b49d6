//! Check command: are the tool binaries installed?

use colored::Colorize;
use recon_core::runner::missing_binaries;
use recon_tools::ToolRegistry;

use super::selected_categories;
use crate::error::Result;

/// Run the check command
///
/// Fails when any binary needed by the selected categories is missing.
pub fn run_check(category: Option<&str>) -> Result<()> {
    let registry = ToolRegistry::with_builtins();
    let binaries = registry.binaries(&selected_categories(category)?);

    println!(
        "{} Checking {} binaries on PATH",
        "=>".blue().bold(),
        binaries.len()
    );

    let missing = missing_binaries(binaries.iter().copied());
    for binary in &binaries {
        if missing.iter().any(|m| m == binary) {
            println!("  {:<14} {}", binary, "MISSING".red().bold());
        } else {
            println!("  {:<14} {}", binary, "OK".green().bold());
        }
    }

    if missing.is_empty() {
        println!("{} All binaries found.", "OK".green().bold());
        Ok(())
    } else {
        Err(recon_core::Error::MissingBinaries { names: missing }.into())
    }
}
