#![forbid(unsafe_code)]

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const STDOUT_SENTINEL: &str = "STDOUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Stdout,
    Stderr,
    File(PathBuf),
}

impl LogDestination {
    /// `STDOUT` selects standard output; anything else is a file path.
    pub fn from_flag(raw: &str) -> Self {
        if raw == STDOUT_SENTINEL {
            LogDestination::Stdout
        } else {
            LogDestination::File(PathBuf::from(raw))
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logging(destination: &LogDestination) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match destination {
        LogDestination::Stdout => registry.with(fmt::layer().with_writer(io::stdout)).try_init(),
        LogDestination::Stderr => registry.with(fmt::layer().with_writer(io::stderr)).try_init(),
        LogDestination::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("failed to open log file '{}': {e}", path.display()))?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };
    installed.map_err(|e| format!("failed to install log subscriber: {e}"))
}
