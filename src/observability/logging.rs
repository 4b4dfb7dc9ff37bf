//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (stderr + log file)
//! - Map configured level names onto `tracing` levels
//! - Provide the `LogSink` seam consumed by the HTTP handlers and the trigger

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Destination for the server's operational log messages.
pub trait LogSink: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

/// Forwards sink messages to the global `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "reboot_server", "{}", message),
            Level::WARN => tracing::warn!(target: "reboot_server", "{}", message),
            Level::INFO => tracing::info!(target: "reboot_server", "{}", message),
            Level::DEBUG => tracing::debug!(target: "reboot_server", "{}", message),
            _ => tracing::trace!(target: "reboot_server", "{}", message),
        }
    }
}

/// Parse a level name, case-insensitively. `WARNING` and `CRITICAL` are
/// accepted as aliases for `WARN` and `ERROR`.
pub fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" | "CRITICAL" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install the global subscriber: one layer on stderr, one appending to the
/// configured log file. `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &LoggingConfig) -> std::io::Result<()> {
    let level = parse_level(&config.log_level)
        .unwrap_or(Level::INFO)
        .to_string()
        .to_ascii_lowercase();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("reboot_server={level},tower_http={level}"))
    });

    let path = Path::new(&config.log_file);
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| std::io::Error::other(e.to_string()))
}

/// Sink that keeps messages in memory, for assertions in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    entries: Mutex<Vec<(Level, String)>>,
}

#[cfg(test)]
impl RecordingSink {
    pub(crate) fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl LogSink for RecordingSink {
    fn log(&self, level: Level, message: &str) {
        self.entries.lock().unwrap().push((level, message.to_string()));
    }
}
