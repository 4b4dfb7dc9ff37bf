//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RebootConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error (the config file must be TOML, e.g. host = \"0.0.0.0\"): {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RebootConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RebootConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the configuration, writing the defaults first if the file is absent.
///
/// The returned flag is `true` when a new file was created.
pub fn load_or_create(path: &Path) -> Result<(RebootConfig, bool), ConfigError> {
    if path.exists() {
        return load_config(path).map(|config| (config, false));
    }

    let config = RebootConfig::default();
    write_config(path, &config)?;
    Ok((config, true))
}

/// Persist a configuration as TOML, creating parent directories as needed.
pub fn write_config(path: &Path, config: &RebootConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
