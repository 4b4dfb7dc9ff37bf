//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Token written into freshly created configuration files.
pub const DEFAULT_TOKEN: &str = "default_secure_token_change_me";

/// Root configuration for the reboot server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RebootConfig {
    /// Listener settings (host, port).
    pub server: ServerConfig,

    /// Shared secret required by `/reboot`.
    pub security: SecurityConfig,

    /// Log file and level.
    pub logging: LoggingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 20086,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding and display.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SecurityConfig {
    /// Expected value of the `token` query parameter.
    pub token: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            token: DEFAULT_TOKEN.to_string(),
        }
    }
}

impl SecurityConfig {
    pub fn uses_default_token(&self) -> bool {
        self.token == DEFAULT_TOKEN
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// File that receives a copy of every log line.
    pub log_file: String,

    /// Level name: TRACE, DEBUG, INFO, WARNING, ERROR or CRITICAL.
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: "reboot_server.log".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}
