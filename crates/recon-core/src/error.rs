//! Error types for recon-core

use std::path::PathBuf;

/// Result type for recon-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in recon-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Settings file not found at an explicitly requested path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A required target setting is absent from both file and environment
    #[error("Missing setting '{key}'. Set {env} or add it to recon.toml")]
    MissingSetting { key: String, env: String },

    /// Binaries required by the selected phases are not on PATH
    #[error("Missing binaries: {}. Install them or pass --skip-missing", .names.join(", "))]
    MissingBinaries { names: Vec<String> },

    /// A tool's binary could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A login URL could not be parsed
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The login page has no form hydra can target
    #[error("No usable login form: {reason}")]
    LoginForm { reason: String },

    /// The model command answered in an unexpected shape
    #[error("Unexpected model answer (want user_field###password_field###failure): {answer}")]
    ModelAnswer { answer: String },

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parse error
    #[error("Invalid settings: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catalog error from recon-tools
    #[error(transparent)]
    Tools(#[from] recon_tools::Error),
}
