//! Tracing setup. The terminal UI owns stdout, so logs go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "SKYHOP_LOG";

const DEFAULT_DIRECTIVE: &str = "skyhop=info";

/// Build the filter from `SKYHOP_LOG`, falling back to `skyhop=info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install a global subscriber appending to `path`.
pub fn init_file_logging(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(env_filter())
        .try_init()?;

    tracing::info!(log = %path.display(), "logging initialized");
    Ok(())
}
