use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Output goes to stderr so command output
/// on stdout stays clean. `RUST_LOG`, when set, wins over `default_filter`.
pub fn init(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))?;

    // A subscriber may already be installed (tests, embedding callers).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}
