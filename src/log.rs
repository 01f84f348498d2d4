// src/log.rs
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::consts::{LOG_FILE, STORE_DIR};
use crate::file::ensure_directory;

/// Stderr filter for a `-v` count. At zero `RUST_LOG` decides, else warnings only.
pub fn stderr_filter(verbosity: u8) -> EnvFilter {
    match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn open_debug_log() -> std::io::Result<File> {
    let dir = Path::new(STORE_DIR);
    ensure_directory(dir)?;
    OpenOptions::new().create(true).append(true).open(dir.join(LOG_FILE))
}

/// Install the global subscriber: filtered stderr output plus a debug-level
/// copy of this crate's events in `.store/debug.log`.
/// Call once, from the binary.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    let (file_layer, file_error) = match open_debug_log() {
        Ok(f) => {
            let layer = fmt::layer()
                .with_writer(Mutex::new(f))
                .with_ansi(false)
                .with_filter(EnvFilter::new(concat!(env!("CARGO_CRATE_NAME"), "=debug")));
            (Some(layer), None)
        }
        Err(e) => (None, Some(e)),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter(verbosity));

    tracing_subscriber::registry().with(stderr_layer).with(file_layer).try_init()?;

    if let Some(e) = file_error {
        tracing::warn!("debug log disabled: {e}");
    }
    Ok(())
}
