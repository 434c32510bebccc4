//! Subscriber setup for the server binary.
//!
//! Logs go to stderr and to `{log_dir}/eastmoney_mcp.log`. Stdout is left
//! alone because the stdio transport owns it. The filter honours `RUST_LOG`
//! and defaults to `info`.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::constants::LOG_FILE_NAME;
use crate::error::{QuoteError, Result};

/// Install the global subscriber. Call once, from `main`.
pub fn init(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| QuoteError::Config(format!("logging already initialised: {e}")))
}
