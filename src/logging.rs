//! Logging setup
//!
//! Stdout belongs to the module result document, so tracing output goes to
//! stderr as JSON, optionally mirrored to an append-only log file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides `log_level` when set.
pub fn init_tracing(log_level: &str, log_file: Option<&Path>) -> io::Result<()> {
    let stderr_layer = fmt::layer()
        .json()
        .with_writer(io::stderr)
        .with_filter(build_filter(log_level));

    let subscriber = tracing_subscriber::registry().with(stderr_layer);

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(build_filter(log_level)),
            )
        }
        None => None,
    };

    // A subscriber may already be installed (tests, embedding callers)
    subscriber.with(file_layer).try_init().ok();

    Ok(())
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Open `path` for appending, creating parent directories as needed
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    OpenOptions::new().create(true).append(true).open(path)
}
