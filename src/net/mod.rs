//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig (host, port)
//!     → listener.rs (resolve & bind)
//!     → HttpServer::run (accept loop, one task per connection)
//! ```
//!
//! # Design Decisions
//! - Bind failure is fatal: a trigger that cannot listen has nothing to do
//! - No connection cap: accepts are unbounded

pub mod listener;

pub use listener::{bind, ListenerError};
