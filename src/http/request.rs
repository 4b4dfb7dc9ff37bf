//! Request handling.
//!
//! # Responsibilities
//! - Turn the raw query string into a key → value mapping
//! - Log every handled request with the client address and outcome
//!
//! # Design Decisions
//! - Keys are unique: the first non-empty value for a key wins
//! - The access log records the path only, so the secret never reaches the log file

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::Level;

use crate::http::server::AppState;

/// Parse a URL query string (without the leading `?`).
///
/// Values are percent- and `+`-decoded. Empty values are dropped, so
/// `token=&token=abc` yields `token = "abc"`.
pub fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    let Some(raw) = raw else {
        return params;
    };

    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Access log middleware: `<ip> - "<METHOD> <path> <version>" <status>`.
pub async fn access_log(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let request_line = format!(
        "{} {} {:?}",
        request.method(),
        request.uri().path(),
        request.version()
    );

    let response = next.run(request).await;

    state.log.log(
        Level::INFO,
        &format!(
            "{} - \"{}\" {}",
            addr.ip(),
            request_line,
            response.status().as_u16()
        ),
    );
    response
}
