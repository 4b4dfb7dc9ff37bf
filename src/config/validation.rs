//! Configuration validation.
//!
//! Serde handles the syntax; this module checks values that parse but make no
//! sense to run with. All errors are collected, not just the first.

use crate::config::schema::RebootConfig;
use crate::observability::logging::parse_level;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("server.host must not be empty")]
    EmptyHost,
    #[error("security.token must not be empty")]
    EmptyToken,
    #[error("logging.log_file must not be empty")]
    EmptyLogFile,
    #[error("logging.log_level '{0}' is not a known level")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &RebootConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    // Empty request tokens are rejected as missing, so an empty secret never matches.
    if config.security.token.is_empty() {
        errors.push(ValidationError::EmptyToken);
    }
    if config.logging.log_file.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFile);
    }
    if parse_level(&config.logging.log_level).is_none() {
        errors.push(ValidationError::UnknownLogLevel(
            config.logging.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
