//! Shutdown coordination for the server.

use tokio::sync::broadcast;

/// Owner side of the stop signal. `main` holds it next to the signal handler.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

/// Listener side of the stop signal, handed to `HttpServer::run`.
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Stop every server holding a signal from this coordinator.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolves once `trigger` is called or the `Shutdown` is dropped.
    pub async fn recv(mut self) {
        let _ = self.rx.recv().await;
    }
}
