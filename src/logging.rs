// ─── Logging ───
// Console and log-file output, each with its own verbosity.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::core::report::verbosity_filter;

/// Overrides the console filter, e.g. `MOD_UPDATER_LOG=mod_updater_lib=trace,reqwest=debug`.
const LOG_ENV: &str = "MOD_UPDATER_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Logging already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Only this crate's events, at or above `verbosity`.
fn crate_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::new(format!(
        "off,{}={}",
        env!("CARGO_CRATE_NAME"),
        verbosity_filter(verbosity)
    ))
}

/// Install the global subscriber.
///
/// `log_file` is appended to, never truncated.
pub fn init_logging(
    print_verbosity: u8,
    log_file: Option<&Path>,
    log_verbosity: u8,
) -> Result<(), LoggingError> {
    let console_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| crate_filter(print_verbosity));
    let console = fmt::layer()
        .with_target(false)
        .with_filter(console_filter);

    let file = match log_file {
        Some(path) => {
            let handle = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(handle))
                    .with_filter(crate_filter(log_verbosity)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()?;
    Ok(())
}
