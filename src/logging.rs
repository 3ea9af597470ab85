//! File-based tracing setup. The terminal belongs to the UI, so nothing is
//! written to stdout or stderr while it runs.

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "pomodo=info";

/// `<data_local_dir>/pomodo/logs`, falling back to `./logs`.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("pomodo").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Installs a daily-rolling file subscriber filtered by `RUST_LOG`.
/// The returned guard flushes buffered lines when dropped, so keep it alive
/// until the app exits.
pub fn init(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;

    let appender = tracing_appender::rolling::daily(log_dir, "pomodo.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    Ok(guard)
}
