//! Security subsystem.
//!
//! # Responsibilities
//! - Decide whether a `/reboot` request carries the configured shared secret
//! - Map the decision onto an HTTP status and plain-text body
//!
//! # Design Decisions
//! - The expected token only ever comes from start-time configuration
//! - No lockout, throttling or rotation: every request is judged on its own

pub mod auth;

pub use auth::{authorize, Decision};
