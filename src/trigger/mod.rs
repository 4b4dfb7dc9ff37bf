//! Reboot trigger subsystem.
//!
//! # Data Flow
//! ```text
//! /reboot handler (Accepted)
//!     → RebootScheduler::schedule_reboot()   returns once the child is spawned
//!     → detached process: sh -c 'sleep 5 && exec /sbin/shutdown -r now'
//!     → exit status logged through the LogSink while the server still runs
//! ```
//!
//! # Design Decisions
//! - The delay is a flush window for the HTTP response, not a cancellation window
//! - The sleep lives in the child, so a scheduled reboot outlives the server
//! - Every accepted request schedules its own reboot; nothing is coalesced
//! - The command is fixed at construction; requests cannot influence it

pub mod scheduler;

pub use scheduler::{
    DelayedReboot, RebootScheduler, TriggerError, REBOOT_ARGS, REBOOT_DELAY, REBOOT_PROGRAM,
};
