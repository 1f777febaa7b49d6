//! Settings resolution
//!
//! Settings are loaded and merged from these sources (later sources override
//! earlier):
//!
//! 1. **Global file** - `<config dir>/recon/recon.toml`, used only when there
//!    is no local file
//! 2. **Local file** - `./recon.toml`, or the path given with `--config`
//! 3. **Environment** - `CTF_PLATFORM`, `CTF_NAME`, `IP_SOURCE`, `IP_CIBLE`,
//!    `URL`, `DOMAIN`, `WORDLIST_DNS`, `WORDLIST_DIR`, `WORDLIST_PASSWORDS`,
//!    `RECON_CURRENT_USER` (falling back to `USER`), `RECON_OS_USER`,
//!    `RECON_OUTPUT_DIR`
//!
//! # Example
//!
//! ```
//! use recon_core::config::Settings;
//!
//! let settings = Settings::parse(r#"
//! [target]
//! name = "box"
//! ip = "10.0.0.5"
//! "#).unwrap();
//!
//! assert_eq!(settings.resources_dir(), std::path::Path::new("./box"));
//! ```

mod settings;

pub use settings::{
    CONFIG_FILE, DEFAULT_WEB_PORTS, OutputSection, ScanSection, Settings, TEMPLATE, TargetSection,
    UserSection, WordlistSection,
};
