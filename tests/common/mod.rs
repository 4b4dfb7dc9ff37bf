//! Shared utilities for end-to-end tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reboot_server::config::RebootConfig;
use reboot_server::net;
use reboot_server::trigger::TriggerError;
use reboot_server::{HttpServer, LogSink, RebootScheduler, Shutdown};
use tokio::task::JoinHandle;
use tracing::Level;

/// Sink that keeps every message for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn log(&self, level: Level, message: &str) {
        self.entries.lock().unwrap().push((level, message.to_string()));
    }
}

/// Scheduler that counts calls and can be told to fail.
#[derive(Default)]
pub struct CountingScheduler {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingScheduler {
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RebootScheduler for CountingScheduler {
    fn schedule_reboot(&self) -> Result<(), TriggerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            // A thread outside the runtime reproduces the real spawn failure.
            return std::thread::spawn(|| tokio::runtime::Handle::try_current().map(|_| ()))
                .join()
                .unwrap()
                .map_err(TriggerError::from);
        }
        Ok(())
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub sink: Arc<RecordingSink>,
    pub task: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

/// Start a server on an ephemeral loopback port with the given secret.
pub async fn start_server(token: &str, scheduler: Arc<dyn RebootScheduler>) -> TestServer {
    let mut config = RebootConfig::default();
    config.server.host = "127.0.0.1".into();
    config.server.port = 0;
    config.security.token = token.into();

    let listener = net::bind(&config.server).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let sink = Arc::new(RecordingSink::default());
    let server = HttpServer::new(&config, scheduler, sink.clone());
    let shutdown = Shutdown::new();
    let signal = shutdown.signal();
    let task = tokio::spawn(server.run(listener, signal));

    TestServer {
        addr,
        shutdown,
        sink,
        task,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
