//! recon CLI
//!
//! Lists the tool catalog, plans and runs the scan pipeline, and prints
//! hydra commands for web login forms.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use std::path::Path;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    if let Err(e) = recon_core::logging::init(level) {
        eprintln!("{} logging disabled: {}", "warning:".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Some(cmd) => execute_command(cmd, cli.config.as_deref()),
        None => {
            println!("{} CTF reconnaissance runner", "recon".green().bold());
            println!();
            println!("Run {} for available commands.", "recon --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, config: Option<&Path>) -> Result<()> {
    match cmd {
        Commands::ListTools { category } => commands::run_list_tools(category.as_deref()),
        Commands::Show { name } => commands::run_show(&name),
        Commands::Plan { category, json } => commands::run_plan(config, category.as_deref(), json),
        Commands::Check { category } => commands::run_check(category.as_deref()),
        Commands::Run {
            phases,
            advanced,
            dry_run,
            skip_missing,
        } => commands::run_scan(
            config,
            &commands::RunArgs {
                phases,
                advanced,
                dry_run,
                skip_missing,
            },
        ),
        Commands::Hydra {
            url,
            mode,
            user,
            failure,
            model_cmd,
            wordlist,
        } => commands::run_hydra(
            config,
            &commands::HydraArgs {
                url,
                mode,
                user,
                failure,
                model_cmd,
                wordlist,
            },
        ),
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            commands::run_init(&cwd, force)
        }
    }
}
