//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the `/reboot` handler and the 404 fallback
//! - Wire up middleware (access log, tracing)
//! - Bind server to listener
//! - Hand authorized requests to the reboot scheduler

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, RawQuery, State},
    http::{StatusCode, Uri},
    middleware,
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::Level;

use crate::config::RebootConfig;
use crate::http::request::{access_log, parse_query};
use crate::http::response::{plain_text, NOT_FOUND_BODY};
use crate::lifecycle::ShutdownSignal;
use crate::observability::LogSink;
use crate::security::{authorize, Decision};
use crate::trigger::RebootScheduler;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub expected_token: Arc<str>,
    pub scheduler: Arc<dyn RebootScheduler>,
    pub log: Arc<dyn LogSink>,
}

/// How long open connections may keep the server alive after shutdown fires.
pub const SHUTDOWN_DRAIN_TIMEOUT: Duration = Duration::from_secs(3);

/// HTTP server for the reboot trigger.
pub struct HttpServer {
    router: Router,
    log: Arc<dyn LogSink>,
}

impl HttpServer {
    /// Create a new HTTP server. Everything the handlers need is passed in
    /// here and fixed for the server's lifetime.
    pub fn new(
        config: &RebootConfig,
        scheduler: Arc<dyn RebootScheduler>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        let state = AppState {
            expected_token: Arc::from(config.security.token.as_str()),
            scheduler,
            log: log.clone(),
        };

        Self {
            router: Self::build_router(state),
            log,
        }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/reboot", get(reboot_handler).head(method_not_allowed))
            .fallback(not_found_handler)
            .layer(middleware::from_fn_with_state(state.clone(), access_log))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the server until `shutdown` fires.
    ///
    /// The listener is closed as soon as the signal arrives. Connections still
    /// open after [`SHUTDOWN_DRAIN_TIMEOUT`] are abandoned.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::debug!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        let (stopping_tx, stopping_rx) = oneshot::channel::<()>();
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                let _ = stopping_tx.send(());
            })
            .into_future();

        let drain_deadline = async move {
            match stopping_rx.await {
                Ok(()) => tokio::time::sleep(SHUTDOWN_DRAIN_TIMEOUT).await,
                Err(_) => std::future::pending::<()>().await,
            }
        };

        let result = tokio::select! {
            result = serve => result,
            _ = drain_deadline => {
                self.log.log(
                    Level::WARN,
                    "Open connections did not finish in time, closing them",
                );
                Ok(())
            }
        };

        if let Err(e) = &result {
            self.log.log(Level::ERROR, &format!("Server error: {}", e));
        }
        self.log.log(Level::INFO, "Server stopped");
        result
    }
}

/// `GET /reboot?token=...`
async fn reboot_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    RawQuery(query): RawQuery,
) -> Response {
    let params = parse_query(query.as_deref());
    let client = addr.ip();
    let decision = authorize(&params, &state.expected_token);

    match decision {
        Decision::MissingToken => {
            state
                .log
                .log(Level::WARN, &format!("Missing token from {}", client));
        }
        Decision::InvalidToken => {
            state
                .log
                .log(Level::WARN, &format!("Invalid token from {}", client));
        }
        Decision::Accepted => {
            state.log.log(
                Level::INFO,
                &format!("Reboot request received from {}", client),
            );
            match state.scheduler.schedule_reboot() {
                Ok(()) => state.log.log(Level::INFO, "Reboot command scheduled"),
                // The caller still gets 200; the failure only reaches the log.
                Err(e) => state.log.log(
                    Level::ERROR,
                    &format!("Failed to execute reboot command: {}", e),
                ),
            }
        }
    }

    plain_text(decision.status(), decision.message())
}

/// HEAD must not trigger a reboot.
async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

async fn not_found_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    uri: Uri,
) -> Response {
    state.log.log(
        Level::INFO,
        &format!("No route for {} from {}", uri.path(), addr.ip()),
    );
    plain_text(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::logging::RecordingSink;
    use crate::trigger::{DelayedReboot, TriggerError};
    use axum::{
        body::Body,
        extract::connect_info::MockConnectInfo,
        http::{Method, Request},
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    #[derive(Default)]
    struct CountingScheduler {
        calls: AtomicUsize,
    }

    impl RebootScheduler for CountingScheduler {
        fn schedule_reboot(&self) -> Result<(), TriggerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Harness {
        app: Router,
        sink: Arc<RecordingSink>,
    }

    fn harness(scheduler: Arc<dyn RebootScheduler>) -> Harness {
        let sink = Arc::new(RecordingSink::default());
        let state = AppState {
            expected_token: Arc::from("abc123"),
            scheduler,
            log: sink.clone(),
        };
        let app = HttpServer::build_router(state)
            .layer(MockConnectInfo(SocketAddr::from(([10, 0, 0, 7], 40000))));
        Harness { app, sink }
    }

    fn counting() -> (Harness, Arc<CountingScheduler>) {
        let scheduler = Arc::new(CountingScheduler::default());
        (harness(scheduler.clone()), scheduler)
    }

    async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn accepted_request_logs_then_schedules() {
        let (h, scheduler) = counting();
        let (status, body) = send(&h.app, Method::GET, "/reboot?token=abc123").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Reboot command received, system will restart shortly");
        assert_eq!(scheduler.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            h.sink.entries(),
            vec![
                (Level::INFO, "Reboot request received from 10.0.0.7".to_string()),
                (Level::INFO, "Reboot command scheduled".to_string()),
                (Level::INFO, "10.0.0.7 - \"GET /reboot HTTP/1.1\" 200".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn rejected_requests_log_warnings() {
        let (h, scheduler) = counting();

        let (status, _) = send(&h.app, Method::GET, "/reboot").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&h.app, Method::GET, "/reboot?token=ABC123").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        assert_eq!(scheduler.calls.load(Ordering::SeqCst), 0);
        let warnings: Vec<_> = h
            .sink
            .entries()
            .into_iter()
            .filter(|(level, _)| *level == Level::WARN)
            .map(|(_, message)| message)
            .collect();
        assert_eq!(
            warnings,
            vec!["Missing token from 10.0.0.7", "Invalid token from 10.0.0.7"]
        );
    }

    #[tokio::test]
    async fn access_log_never_contains_the_token() {
        let (h, _) = counting();
        send(&h.app, Method::GET, "/reboot?token=abc123").await;
        send(&h.app, Method::GET, "/reboot?token=guess").await;

        for (_, message) in h.sink.entries() {
            assert!(!message.contains("abc123"), "leaked: {message}");
            assert!(!message.contains("guess"), "leaked: {message}");
        }
    }

    #[tokio::test]
    async fn scheduling_failure_still_returns_ok() {
        let log = Arc::new(RecordingSink::default());
        let scheduler = DelayedReboot::with_command(Duration::from_secs(5), "true", &[], log)
            .with_launcher("/nonexistent/sh");
        let h = harness(Arc::new(scheduler));

        let (status, body) = send(&h.app, Method::GET, "/reboot?token=abc123").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Reboot command received, system will restart shortly");
        let errors: Vec<_> = h
            .sink
            .entries()
            .into_iter()
            .filter(|(level, _)| *level == Level::ERROR)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0]
            .1
            .starts_with("Failed to execute reboot command: failed to launch '/nonexistent/sh'"));

        // Next request is served normally.
        let (status, _) = send(&h.app, Method::GET, "/reboot?token=wrong").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let (h, scheduler) = counting();
        for uri in ["/status", "/", "/reboot/", "/REBOOT?token=abc123", "/x?token=abc123"] {
            let (status, body) = send(&h.app, Method::GET, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, "Not Found");
        }
        assert_eq!(scheduler.calls.load(Ordering::SeqCst), 0);
        assert!(h
            .sink
            .entries()
            .contains(&(Level::INFO, "No route for /status from 10.0.0.7".to_string())));
    }

    #[tokio::test]
    async fn only_get_triggers() {
        let (h, scheduler) = counting();
        for method in [Method::HEAD, Method::POST, Method::PUT, Method::DELETE] {
            let (status, _) = send(&h.app, method.clone(), "/reboot?token=abc123").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        }
        assert_eq!(scheduler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn every_accepted_request_schedules() {
        let (h, scheduler) = counting();
        for _ in 0..4 {
            let (status, _) = send(&h.app, Method::GET, "/reboot?token=abc123").await;
            assert_eq!(status, StatusCode::OK);
        }
        assert_eq!(scheduler.calls.load(Ordering::SeqCst), 4);
    }
}
