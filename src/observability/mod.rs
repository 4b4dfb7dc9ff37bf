//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handlers, trigger
//!     → LogSink (injected, level + message)
//!     → TracingSink → tracing subscriber
//!     → stderr and the configured log file
//! ```
//!
//! # Design Decisions
//! - Components never touch the global subscriber directly; they log through
//!   the sink handed to them at construction
//! - Log level configurable via config and `RUST_LOG`

pub mod logging;

pub use logging::{init_logging, parse_level, LogSink, TracingSink};
