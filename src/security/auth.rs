use std::collections::HashMap;

use axum::http::StatusCode;

/// Outcome of checking a `/reboot` request's credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    /// `token` absent or empty.
    MissingToken,
    /// `token` present but not byte-equal to the configured secret.
    InvalidToken,
}

impl Decision {
    pub fn status(self) -> StatusCode {
        match self {
            Decision::Accepted => StatusCode::OK,
            Decision::MissingToken => StatusCode::BAD_REQUEST,
            Decision::InvalidToken => StatusCode::UNAUTHORIZED,
        }
    }

    /// Plain-text response body.
    pub fn message(self) -> &'static str {
        match self {
            Decision::Accepted => "Reboot command received, system will restart shortly",
            Decision::MissingToken => "Missing token parameter",
            Decision::InvalidToken => "Invalid token",
        }
    }
}

/// Check the `token` query parameter against the expected secret.
pub fn authorize(query: &HashMap<String, String>, expected_token: &str) -> Decision {
    match query.get("token").map(String::as_str) {
        None | Some("") => Decision::MissingToken,
        Some(token) if token == expected_token => Decision::Accepted,
        Some(_) => Decision::InvalidToken,
    }
}
