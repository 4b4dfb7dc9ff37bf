//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (create defaults if missing, parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RebootConfig (validated, immutable)
//!     → shared via Arc with the HTTP server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_create, ConfigError};
pub use schema::{LoggingConfig, RebootConfig, SecurityConfig, ServerConfig, DEFAULT_TOKEN};
