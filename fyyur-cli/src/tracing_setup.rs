//! Tracing setup for the fyyur CLI
//!
//! Usage:
//!   fyyur --debug serve               # Debug logging to console
//!   RUST_LOG=fyyur_server=debug fyyur serve
//!
//! Filter precedence: RUST_LOG, then `--debug`, then `[logging] level`.
//! When `[logging] file` is set, events are also appended there without ANSI colours.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (ignored when RUST_LOG is set)
    pub debug: bool,
    /// Fallback filter directive, e.g. "info"
    pub level: String,
    /// Optional log file, appended to
    pub file: Option<PathBuf>,
}

impl TracingConfig {
    fn default_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else if self.level.trim().is_empty() {
            "info"
        } else {
            self.level.trim()
        }
    }
}

fn build_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_directive()))
}

/// Initialize console tracing, plus a file layer when configured
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let console = tracing_subscriber::fmt::layer()
        .with_target(config.debug) // Show targets in debug mode
        .compact();

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(format!("Failed to open log file: {:?}", path))?;

            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
}
