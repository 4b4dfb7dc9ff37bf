//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (one task each)
//!     → server.rs (Axum setup, routing by exact path)
//!     → request.rs (query parsing, access log)
//!     → security::auth (token decision)      /reboot only
//!     → trigger (detached reboot)            Accepted only
//!     → response.rs (plain-text body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
