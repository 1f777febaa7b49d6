//! Interactive prompts for CLI commands
//!
//! Uses dialoguer for terminal-based selection and input.

use dialoguer::{Input, Select};

use crate::cli::BruteMode;
use crate::error::Result;

const MODES: &[&str] = &["username", "password"];

/// Ask which credential hydra should iterate over.
pub fn select_mode() -> Result<BruteMode> {
    let idx = Select::new()
        .with_prompt("Brute-force which field?")
        .items(MODES)
        .default(0)
        .interact()?;
    Ok(if idx == 0 {
        BruteMode::Username
    } else {
        BruteMode::Password
    })
}

/// Ask for the fixed user of a password attack.
pub fn input_user() -> Result<String> {
    let user: String = Input::new()
        .with_prompt("Fixed username")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("Username cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(user.trim().to_string())
}

/// Ask for the text a failed login shows.
pub fn input_failure() -> Result<String> {
    let failure: String = Input::new()
        .with_prompt("Text shown on a failed login")
        .interact_text()?;
    Ok(failure.trim().to_string())
}
