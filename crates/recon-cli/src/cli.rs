//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// recon - Run a CTF reconnaissance toolchain against one target
#[derive(Parser, Debug)]
#[command(name = "recon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to ./recon.toml, then the user config dir)
    #[arg(short, long, global = true, env = "RECON_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List catalogued tools by category
    ListTools {
        /// Only list one category (e.g., web, network-ports)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Show a tool's binary, category and argument tuple
    ///
    /// Examples:
    ///   recon show nmap
    ///   recon show ffuf-subdomains
    Show {
        /// Name of the tool (use 'recon list-tools' to see options)
        name: String,
    },

    /// Print the command each tool would run for the current target
    ///
    /// Tools that cannot be bound are listed with the missing value.
    ///
    /// Examples:
    ///   recon plan                    # Every category
    ///   recon plan -C web             # Web tools only
    ///   recon plan --json             # Machine-readable
    Plan {
        /// Only plan one category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check that the tool binaries are installed
    Check {
        /// Only check one category
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Run the scan pipeline
    ///
    /// Without --phase, runs network-ports, network-services and web.
    ///
    /// Examples:
    ///   recon run                           # Default phases
    ///   recon run --advanced                # Add web-advanced
    ///   recon run -p web -p web-advanced    # Web only
    ///   recon run --dry-run                 # Show what would run
    Run {
        /// Phase to run; repeat for several
        #[arg(short = 'p', long = "phase")]
        phases: Vec<String>,

        /// Also run the web-advanced phase
        #[arg(long)]
        advanced: bool,

        /// Record commands without executing them
        #[arg(long)]
        dry_run: bool,

        /// Skip tools whose binary is missing instead of aborting
        #[arg(long)]
        skip_missing: bool,
    },

    /// Build a hydra command for a web login form
    ///
    /// Reads the form at --url, then prints the hydra http-post-form command.
    /// Prompts for the mode and user when they are not given.
    ///
    /// Examples:
    ///   recon hydra --url box.htb/login.php --mode username --failure "Invalid"
    ///   recon hydra --url http://box.htb/ --user admin --model-cmd "mods -m expert"
    Hydra {
        /// Login page; http:// is assumed when no scheme is given
        #[arg(long)]
        url: String,

        /// Credential to iterate over
        #[arg(long, value_enum)]
        mode: Option<BruteMode>,

        /// Fixed user for password mode (implies --mode password)
        #[arg(long)]
        user: Option<String>,

        /// Text the page shows on a failed login
        #[arg(long, conflicts_with = "model_cmd")]
        failure: Option<String>,

        /// Command that reads a sample failed login on stdin and answers
        /// user_field###password_field###failure
        #[arg(long)]
        model_cmd: Option<String>,

        /// Wordlist (defaults to wordlists.passwords, then rockyou)
        #[arg(short, long)]
        wordlist: Option<String>,
    },

    /// Write a recon.toml template into the current directory
    Init {
        /// Overwrite an existing recon.toml
        #[arg(short, long)]
        force: bool,
    },
}

/// Credential hydra iterates over
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BruteMode {
    Username,
    Password,
}
