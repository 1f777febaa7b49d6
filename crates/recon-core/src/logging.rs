use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber.
///
/// Logs go to stderr so tool listings on stdout stay clean. `RUST_LOG`
/// takes precedence; otherwise `default_level` is used.
pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
