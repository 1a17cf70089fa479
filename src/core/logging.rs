//! Logging Module
//!
//! Sets up `tracing` with:
//! - a daily rolling JSON log file under the user's data directory
//! - an optional human-readable stderr layer (stdout belongs to the CLI)
//! - `log` crate records forwarded by the subscriber's log bridge
//! - background gzip compression of previous days' log files

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "nepali-spell.log";

// ============================================================================
// Logging Initialization
// ============================================================================

/// Initialize logging with both the JSON file layer and a pretty stderr layer.
///
/// The returned `WorkerGuard` must be kept alive for the lifetime of the
/// program so buffered file output is flushed on exit.
pub fn init() -> WorkerGuard {
    setup(log_dir(), true)
}

/// Same as [`init()`] without the stderr layer.
///
/// Used when the terminal output must stay machine-readable.
pub fn init_quiet() -> WorkerGuard {
    setup(log_dir(), false)
}

fn setup(log_dir: PathBuf, console: bool) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    let console_layer = console.then(|| {
        let console_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty()
            .with_filter(console_filter)
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    // Compression logs through the subscriber, so it starts after init
    let compress_dir = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&compress_dir);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Directory holding the rolling log files
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("nepali-spell").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

// ============================================================================
// Log Compression
// ============================================================================

/// Rolled files are named `prefix.YYYY-MM-DD`; today's file is still open
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{}.", LOG_FILE_PREFIX))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if !should_compress(name, &today_suffix) {
            continue;
        }

        match gzip_in_place(&path) {
            Ok(true) => log::info!("Compressed old log: {:?}", path),
            Ok(false) => log::debug!("Archive already present for {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

/// Replace `path` with `path.gz`. Returns `false` without touching
/// anything when the archive already exists.
fn gzip_in_place(path: &Path) -> io::Result<bool> {
    let mut archive = path.as_os_str().to_owned();
    archive.push(".gz");
    let archive = PathBuf::from(archive);
    if archive.exists() {
        return Ok(false);
    }

    let contents = fs::read(path)?;
    let mut encoder = GzEncoder::new(fs::File::create(&archive)?, Compression::default());
    encoder.write_all(&contents)?;
    encoder.finish()?.sync_all()?;

    fs::remove_file(path)?;
    Ok(true)
}
