//! Remote reboot trigger.
//!
//! One authenticated HTTP action, `GET /reboot?token=<secret>`, that schedules
//! a host reboot a few seconds later and answers the caller right away.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net::listener ──▶ http::server ──▶ security::auth
//!                                            │                 │
//!                                            │ 404             │ Accepted
//!                                            ▼                 ▼
//!     Client Response ◀──────────── http::response      trigger::scheduler
//!                                                            │ (detached)
//!                                                            ▼
//!                                                  sleep 5s → shutdown -r now
//! ```
//!
//! Configuration and the log sink are built once at startup and handed to the
//! server at construction; nothing on the request path is mutable.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod security;
pub mod trigger;

pub use config::RebootConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::{LogSink, TracingSink};
pub use trigger::{DelayedReboot, RebootScheduler};
