//! TCP listener setup.
//!
//! # Responsibilities
//! - Resolve the configured `host:port`
//! - Bind the listening socket

use tokio::net::TcpListener;

use crate::config::ServerConfig;

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind to the configured address.
///
/// `host` may be an IP literal or a resolvable name.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ListenerError> {
    let address = config.bind_address();

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.clone(),
            source,
        })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::debug!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}
