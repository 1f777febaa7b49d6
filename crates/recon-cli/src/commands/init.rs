//! Init command: write a settings template

use std::path::Path;

use colored::Colorize;
use recon_core::config::{CONFIG_FILE, TEMPLATE};

use crate::error::{CliError, Result};

/// Run the init command
///
/// Writes `recon.toml` into `dir`; an existing file is kept unless `force`.
pub fn run_init(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);

    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        )));
    }

    std::fs::write(&path, TEMPLATE)?;

    println!("{} Wrote {}", "OK".green().bold(), path.display());
    println!(
        "Fill in the {} section or export {} and friends, then run {}.",
        "[target]".cyan(),
        "CTF_NAME".cyan(),
        "recon plan".cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_core::Settings;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_template() {
        let temp = TempDir::new().unwrap();
        run_init(temp.path(), false).unwrap();

        let written = temp.path().join(CONFIG_FILE);
        assert!(Settings::load(&written).is_ok());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[target]\nname = \"mine\"\n").unwrap();

        let err = run_init(temp.path(), false).unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
        assert!(std::fs::read_to_string(&path).unwrap().contains("mine"));

        run_init(temp.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), TEMPLATE);
    }
}
