//! Delayed, detached execution of the reboot command.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::runtime::Handle;
use tracing::Level;

use crate::observability::LogSink;

/// Time between scheduling and running the reboot command.
pub const REBOOT_DELAY: Duration = Duration::from_secs(5);

pub const REBOOT_PROGRAM: &str = "/sbin/shutdown";
pub const REBOOT_ARGS: &[&str] = &["-r", "now"];

/// Shell that hosts the sleep. The command is passed as positional
/// parameters, never interpolated into the script.
const LAUNCHER: &str = "/bin/sh";
const LAUNCHER_SCRIPT: &str = r#"sleep "$0" && exec "$@""#;

/// Error type for scheduling the reboot.
#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// No tokio runtime to watch the child on.
    #[error("no runtime available to schedule the reboot: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),

    /// The delayed process could not be started.
    #[error("failed to launch '{launcher}': {source}")]
    Spawn {
        launcher: String,
        #[source]
        source: std::io::Error,
    },
}

/// Schedules the host reboot without blocking the caller.
///
/// Implementations must return as soon as the work is queued. The eventual
/// outcome of the reboot itself is never reported back through this call.
pub trait RebootScheduler: Send + Sync {
    fn schedule_reboot(&self) -> Result<(), TriggerError>;
}

/// Production scheduler.
///
/// Each call starts a separate OS process that sleeps for the delay and then
/// execs the reboot command. The process sits in its own process group, so
/// neither the server exiting nor a terminal Ctrl-C stops it.
pub struct DelayedReboot {
    delay: Duration,
    program: String,
    args: Vec<String>,
    launcher: String,
    log: Arc<dyn LogSink>,
}

impl DelayedReboot {
    /// `/sbin/shutdown -r now` after [`REBOOT_DELAY`].
    pub fn new(log: Arc<dyn LogSink>) -> Self {
        Self::with_command(REBOOT_DELAY, REBOOT_PROGRAM, REBOOT_ARGS, log)
    }

    /// Same scheduling, different command. Used by tests and embedders that
    /// need a harmless stand-in for the real reboot.
    pub fn with_command(
        delay: Duration,
        program: impl Into<String>,
        args: &[&str],
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            delay,
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            launcher: LAUNCHER.to_string(),
            log,
        }
    }

    fn spawn_child(&self) -> Result<Child, TriggerError> {
        let mut command = Command::new(&self.launcher);
        command
            .arg("-c")
            .arg(LAUNCHER_SCRIPT)
            .arg(self.delay.as_secs_f64().to_string())
            .arg(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);
        #[cfg(unix)]
        command.process_group(0);

        command.spawn().map_err(|source| TriggerError::Spawn {
            launcher: self.launcher.clone(),
            source,
        })
    }
}

impl RebootScheduler for DelayedReboot {
    fn schedule_reboot(&self) -> Result<(), TriggerError> {
        let handle = Handle::try_current()?;
        let _entered = handle.enter();

        let child = self.spawn_child()?;

        let program = self.program.clone();
        let log = self.log.clone();
        // Only reports the outcome. Dropping this task (runtime shutdown)
        // leaves the child running.
        handle.spawn(async move {
            watch_child(child, &program, log.as_ref()).await;
        });

        Ok(())
    }
}

async fn watch_child(mut child: Child, program: &str, log: &dyn LogSink) {
    match child.wait().await {
        Ok(status) if status.success() => {
            log.log(Level::INFO, &format!("Reboot command '{}' completed", program));
        }
        Ok(status) => {
            log.log(
                Level::ERROR,
                &format!("Reboot command '{}' failed with {}", program, status),
            );
        }
        Err(e) => {
            log.log(
                Level::ERROR,
                &format!("Lost track of reboot command '{}': {}", program, e),
            );
        }
    }
}

#[cfg(test)]
impl DelayedReboot {
    pub(crate) fn with_launcher(mut self, launcher: &str) -> Self {
        self.launcher = launcher.to_string();
        self
    }
}
