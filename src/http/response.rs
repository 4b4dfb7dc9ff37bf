//! Response helpers.
//!
//! Every response this server produces is a short `text/plain` message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const NOT_FOUND_BODY: &str = "Not Found";

/// `text/plain; charset=utf-8` response with a static body.
pub fn plain_text(status: StatusCode, body: &'static str) -> Response {
    (status, body).into_response()
}
