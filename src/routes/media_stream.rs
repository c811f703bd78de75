//! Media-stream WebSocket route configuration

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::media_stream::media_stream_handler;
use crate::state::AppState;
use std::sync::Arc;

/// Path the telephony platform connects to.
pub const MEDIA_STREAM_PATH: &str = "/ws/twilio";

/// Create the media-stream WebSocket router
///
/// # Endpoint
///
/// `GET /ws/twilio` - WebSocket upgrade for one telephony call
///
/// # Protocol
///
/// The platform sends JSON `connected`, `start`, `media`, `mark` and `stop`
/// events carrying base64 μ-law 8kHz audio. The bridge replies with `media`
/// events echoing the `streamSid`.
pub fn create_media_stream_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(MEDIA_STREAM_PATH, get(media_stream_handler))
        .layer(TraceLayer::new_for_http())
}
