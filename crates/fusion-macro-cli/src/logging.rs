//! Tracing setup for the `fusion-macro` binary.
//!
//! Errors go to stderr. When a log directory is available, every event is
//! also appended to one file per level threshold, so `info.log` holds
//! everything at INFO and above, `error.log` only errors, and so on.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Directory name under the XDG data home.
pub const APP_DIR: &str = "davinci-cli";

/// Log file names and the minimum level each one records.
///
/// There is no `critical.log`: `tracing` has no level above ERROR, so such a
/// file would only ever duplicate `error.log`.
pub const LOG_FILES: [(&str, LevelFilter); 4] = [
    ("debug.log", LevelFilter::DEBUG),
    ("info.log", LevelFilter::INFO),
    ("warning.log", LevelFilter::WARN),
    ("error.log", LevelFilter::ERROR),
];

/// `$XDG_DATA_HOME/davinci-cli`, falling back to `$HOME/.local/share/davinci-cli`.
pub fn default_log_dir() -> Option<PathBuf> {
    let data_home = std::env::var_os("XDG_DATA_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
        })?;
    Some(data_home.join(APP_DIR))
}

/// Install the global subscriber.
///
/// The stderr layer honors `RUST_LOG` and defaults to `error`. A log
/// directory that cannot be opened does not stop the program: file logging
/// is skipped and a warning is emitted, visible with `RUST_LOG=warn`.
pub fn init(log_dir: Option<&Path>) -> Result<()> {
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_target(false)
        .with_filter(stderr_filter);

    let (files, file_error) = match log_dir.map(file_layers).transpose() {
        Ok(layers) => (layers.unwrap_or_default(), None),
        Err(err) => (Vec::new(), Some(err)),
    };

    tracing_subscriber::registry()
        .with(stderr)
        .with(files)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(err) = file_error {
        tracing::warn!("file logging disabled: {err:#}");
    }
    Ok(())
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn file_layers<S>(dir: &Path) -> Result<Vec<BoxedLayer<S>>>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    LOG_FILES
        .iter()
        .map(|&(name, level)| {
            let path = dir.join(name);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Ok(fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_filter(level)
                .boxed())
        })
        .collect()
}
