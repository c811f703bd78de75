//! OpenAI Realtime API connector.
//!
//! Opens the upstream model socket for one call.
//!
//! # API Reference
//!
//! - Endpoint: `wss://api.openai.com/v1/realtime?model=<model>`
//! - Headers: `Authorization: Bearer <key>`, `OpenAI-Beta: realtime=v1`
//! - Protocol: WebSocket with JSON events

use async_trait::async_trait;
use http::{HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use url::Url;

use super::config::{DEFAULT_REALTIME_MODEL, OPENAI_BETA_HEADER_VALUE, OPENAI_REALTIME_URL};
use crate::core::realtime::base::{
    ModelSocket, RealtimeConfig, RealtimeConnector, RealtimeError, RealtimeResult,
};

/// Connector for the OpenAI Realtime API.
#[derive(Debug, Clone)]
pub struct OpenAIRealtimeConnector {
    config: RealtimeConfig,
    endpoint: Url,
}

impl OpenAIRealtimeConnector {
    /// Create a connector, validating the credential and endpoint up front.
    pub fn new(config: RealtimeConfig) -> RealtimeResult<Self> {
        if config.api_key.is_empty() {
            return Err(RealtimeError::AuthenticationFailed(
                "API key is required".to_string(),
            ));
        }

        let endpoint = Self::build_ws_url(&config)?;
        Ok(Self { config, endpoint })
    }

    /// Model identifier requested on each connection.
    pub fn model(&self) -> &str {
        if self.config.model.is_empty() {
            DEFAULT_REALTIME_MODEL
        } else {
            &self.config.model
        }
    }

    /// Full WebSocket URL including the model query parameter.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_ws_url(config: &RealtimeConfig) -> RealtimeResult<Url> {
        let base = if config.url.is_empty() {
            OPENAI_REALTIME_URL
        } else {
            config.url.as_str()
        };

        let mut url = Url::parse(base).map_err(|e| {
            RealtimeError::InvalidConfiguration(format!("Invalid realtime URL '{base}': {e}"))
        })?;

        match url.scheme() {
            "ws" | "wss" => {}
            other => {
                return Err(RealtimeError::InvalidConfiguration(format!(
                    "Realtime URL must use ws or wss, got '{other}'"
                )));
            }
        }

        let model = if config.model.is_empty() {
            DEFAULT_REALTIME_MODEL
        } else {
            config.model.as_str()
        };
        url.query_pairs_mut().append_pair("model", model);

        Ok(url)
    }

    /// Build the upgrade request with credential and protocol-version headers.
    fn build_request(&self) -> RealtimeResult<Request> {
        let mut request = self
            .endpoint
            .as_str()
            .into_client_request()
            .map_err(|e| RealtimeError::ConnectionFailed(e.to_string()))?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| RealtimeError::InvalidConfiguration(format!("Invalid API key: {e}")))?;

        let headers = request.headers_mut();
        headers.insert(http::header::AUTHORIZATION, bearer);
        headers.insert(
            HeaderName::from_static("openai-beta"),
            HeaderValue::from_static(OPENAI_BETA_HEADER_VALUE),
        );

        Ok(request)
    }
}

#[async_trait]
impl RealtimeConnector for OpenAIRealtimeConnector {
    async fn connect(&self) -> RealtimeResult<ModelSocket> {
        let request = self.build_request()?;

        tracing::debug!(model = %self.model(), host = ?self.endpoint.host_str(), "Connecting to OpenAI Realtime API");

        let (ws_stream, _response) = tokio_tungstenite::connect_async(request)
            .await
            .map_err(|e| RealtimeError::ConnectionFailed(e.to_string()))?;

        tracing::info!(model = %self.model(), "Connected to OpenAI Realtime API");
        Ok(ws_stream)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
