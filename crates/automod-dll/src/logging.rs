//! File logging for the payload
//!
//! The payload has no console, so everything goes to a timestamped log file
//! in the game's working directory. `AUTOMOD_LOG` overrides the filter.

use std::fs::File;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

pub fn init() -> Result<()> {
    let filename = format!("automod-{}.log", chrono::Local::now().format("%Y%m%d-%H%M%S"));
    let file = File::create(&filename)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("AUTOMOD_LOG").unwrap_or_else(|_| EnvFilter::new("automod=debug")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing tracing subscriber: {e}"))?;

    Ok(())
}
