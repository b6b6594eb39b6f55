use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::CoreResult;

/// Overrides the log file location.
pub const LOG_FILE_ENV: &str = "GOSTR_LOG_FILE";
/// `EnvFilter` directives, e.g. `gostr_core=debug`.
pub const LOG_FILTER_ENV: &str = "GOSTR_LOG";

/// Log file to use: `GOSTR_LOG_FILE` if set, otherwise `default_path`.
pub fn log_file(default_path: &Path) -> PathBuf {
    std::env::var_os(LOG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path.to_path_buf())
}

/// Install the global subscriber writing to a log file.
///
/// The terminal belongs to the UI, so nothing is written to stdout/stderr.
pub fn init_tracing(default_path: &Path) -> CoreResult<PathBuf> {
    let log_path = log_file(default_path);
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_filter(filter);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
    Ok(log_path)
}

/// Subscriber for the line-oriented CLI: stderr, `warn` unless verbose.
pub fn init_cli_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let default = dir.path().join("logs").join("gostr.log");
        // Only meaningful when the override is not set in the environment.
        if std::env::var_os(LOG_FILE_ENV).is_none() {
            let path = init_tracing(&default).unwrap();
            assert_eq!(path, default);
            assert!(path.exists());
        }
    }
}
