//! Base traits and types for the upstream realtime model connection.
//!
//! The bridge opens exactly one model socket per inbound call through a
//! [`RealtimeConnector`]. The connector either returns a fully open socket
//! or an error; there is never a half-open handle to clean up.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while talking to the realtime model service.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// Connection to the provider failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Operation timeout
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

/// Result type for realtime operations.
pub type RealtimeResult<T> = Result<T, RealtimeError>;

// =============================================================================
// Configuration Types
// =============================================================================

/// Connection settings for the realtime model service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// API key sent as a bearer credential
    pub api_key: String,

    /// Model identifier, sent as the `model` query parameter
    #[serde(default)]
    pub model: String,

    /// Base WebSocket endpoint. Empty means the provider default.
    #[serde(default)]
    pub url: String,
}

// =============================================================================
// Connector Trait
// =============================================================================

/// Socket type returned by a connector.
pub type ModelSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Factory for upstream model sockets.
///
/// Called once per accepted telephony connection. Sockets are never pooled
/// or reused; each one lives for the duration of a single call.
#[async_trait]
pub trait RealtimeConnector: Send + Sync {
    /// Open a new model socket, suspending until it is ready or has failed.
    async fn connect(&self) -> RealtimeResult<ModelSocket>;

    /// Short provider name for logging.
    fn provider_name(&self) -> &'static str;
}

/// Shared connector handle.
pub type BoxedConnector = Arc<dyn RealtimeConnector>;
