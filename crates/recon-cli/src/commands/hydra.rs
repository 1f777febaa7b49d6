//! Hydra command: print a brute-force command for a web login form

use std::path::Path;

use colored::Colorize;
use recon_core::bruteforce::{FieldSource, HydraMode, build_hydra_command, normalize_url};
use recon_core::{ProcessExecutor, Settings};

use super::block_on;
use crate::cli::BruteMode;
use crate::error::{CliError, Result};
use crate::interactive;

/// Wordlist used when neither the flag nor the settings name one.
pub const DEFAULT_WORDLIST: &str = "/usr/share/wordlists/rockyou.txt";

/// Flags of the hydra command
#[derive(Debug, Clone, Default)]
pub struct HydraArgs {
    pub url: String,
    pub mode: Option<BruteMode>,
    pub user: Option<String>,
    pub failure: Option<String>,
    pub model_cmd: Option<String>,
    pub wordlist: Option<String>,
}

impl HydraArgs {
    /// The mode the flags settle on; `None` when a prompt is needed.
    fn mode(&self) -> Option<HydraMode> {
        let user = self.user.as_deref().map(str::trim).filter(|u| !u.is_empty());
        match (self.mode, user) {
            (Some(BruteMode::Username), _) => Some(HydraMode::Username),
            (Some(BruteMode::Password) | None, Some(user)) => Some(HydraMode::Password {
                user: user.to_string(),
            }),
            (Some(BruteMode::Password) | None, None) => None,
        }
    }

    /// Where field names come from; `None` when a prompt is needed.
    fn field_source(&self) -> Option<FieldSource> {
        match (&self.model_cmd, &self.failure) {
            (Some(cmd), _) => Some(FieldSource::Model(cmd.clone())),
            (None, Some(failure)) if !failure.trim().is_empty() => {
                Some(FieldSource::Failure(failure.trim().to_string()))
            }
            _ => None,
        }
    }

    fn wordlist(&self, settings: &Settings) -> String {
        self.wordlist
            .clone()
            .or_else(|| settings.wordlists.passwords.clone())
            .unwrap_or_else(|| DEFAULT_WORDLIST.to_string())
    }
}

/// Run the hydra command
pub fn run_hydra(config: Option<&Path>, args: &HydraArgs) -> Result<()> {
    let page = normalize_url(&args.url)?;
    let settings = Settings::resolve(config)?;

    let mode = match args.mode() {
        Some(mode) => mode,
        None => prompt_mode(args.mode)?,
    };
    let source = match args.field_source() {
        Some(source) => source,
        None => prompt_failure()?,
    };
    let wordlist = args.wordlist(&settings);

    println!(
        "{} Reading login form at {} ({} mode)",
        "=>".blue().bold(),
        page.as_str().cyan(),
        mode.label()
    );
    let cmd = block_on(build_hydra_command(
        &ProcessExecutor::new(),
        &page,
        &mode,
        &source,
        &wordlist,
    ))??;

    println!("{} hydra command:", "OK".green().bold());
    println!("{cmd}");
    Ok(())
}

fn prompt_failure() -> Result<FieldSource> {
    let failure = interactive::input_failure()?;
    if failure.is_empty() {
        return Err(CliError::user(
            "A failure text is required. Pass --failure or --model-cmd",
        ));
    }
    Ok(FieldSource::Failure(failure))
}

fn prompt_mode(flag: Option<BruteMode>) -> Result<HydraMode> {
    let mode = match flag {
        Some(mode) => mode,
        None => interactive::select_mode()?,
    };
    Ok(match mode {
        BruteMode::Username => HydraMode::Username,
        BruteMode::Password => HydraMode::Password {
            user: interactive::input_user()?,
        },
    })
}
