//! Startup checks and announcements.

use tracing::Level;

use crate::config::RebootConfig;
use crate::observability::LogSink;

/// Whether the process runs with an effective uid of 0, when that can be
/// determined.
#[cfg(unix)]
pub fn running_as_root() -> Option<bool> {
    // geteuid cannot fail.
    Some(unsafe { libc::geteuid() } == 0)
}

#[cfg(not(unix))]
pub fn running_as_root() -> Option<bool> {
    None
}

/// Warnings about the environment the server starts in.
pub fn startup_warnings(config: &RebootConfig, is_root: Option<bool>) -> Vec<&'static str> {
    let mut warnings = Vec::new();
    if is_root == Some(false) {
        warnings.push("This server should be run as root to execute reboot commands");
    }
    if config.security.uses_default_token() {
        warnings.push("Using the default token; change security.token in the config file");
    }
    warnings
}

/// Log the start banner and any startup warnings.
pub fn announce(config: &RebootConfig, log: &dyn LogSink) {
    for warning in startup_warnings(config, running_as_root()) {
        log.log(Level::WARN, warning);
    }
    log.log(
        Level::INFO,
        &format!("Server started at http://{}", config.server.bind_address()),
    );
    log.log(
        Level::INFO,
        "To reboot the system, send a GET request to /reboot?token=YOUR_TOKEN",
    );
}
