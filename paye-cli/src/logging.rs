//! Tracing setup for the `paye` binary.
//!
//! Records go to stderr so table or JSON output on stdout stays clean, and
//! are also appended to a log file when one is configured. `RUST_LOG` wins
//! over the configured level.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Local wall-clock timestamps, millisecond precision with UTC offset.
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(
        &self,
        w: &mut Writer<'_>,
    ) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

/// Accepts a bare level ("error", "warn", "info", "debug", "trace") or any
/// full EnvFilter directive.
fn configured_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
}

fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

/// Installs the global subscriber. Call once, after the config is resolved.
///
/// - Stderr: colored when attached to a terminal, plain when piped.
/// - File: plain text appended to `log_file`; its directory must exist.
/// - Level: `RUST_LOG` if set and valid, otherwise `level`.
pub fn init_logging(
    level: &str,
    log_file: Option<&Path>,
) -> Result<()> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_overrides = from_env.is_some();
    let filter = match from_env {
        Some(filter) => filter,
        None => configured_filter(level)?,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_timer(LocalTime)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = log_file.map(open_log_file).transpose()?.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_timer(LocalTime)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("logging is already initialized")?;

    if env_overrides {
        debug!(configured = level, "RUST_LOG is set; ignoring configured log level");
    }
    if let Some(path) = log_file {
        info!(path = %path.display(), "logging to file");
    }
    Ok(())
}
