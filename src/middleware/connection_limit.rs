//! Concurrent-call limit middleware for the media-stream endpoint
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use voice_bridge::middleware::call_limit_middleware;
//!
//! let app = Router::new()
//!     .route("/ws/twilio", get(media_stream_handler))
//!     .layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         call_limit_middleware,
//!     ));
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::state::{AppState, CallLimitError};

/// Middleware that enforces the global concurrent-call limit.
///
/// This middleware:
/// 1. Passes non-upgrade requests through untouched
/// 2. Reserves a call slot for each WebSocket upgrade request
/// 3. Returns 503 Service Unavailable when no slot is free
/// 4. Injects the `CallPermit` extension so the slot lives as long as the call
pub async fn call_limit_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let is_ws_upgrade = request
        .headers()
        .get("upgrade")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("websocket"))
        .unwrap_or(false);

    if !is_ws_upgrade {
        return next.run(request).await;
    }

    match state.try_acquire_call() {
        Ok(permit) => {
            request.extensions_mut().insert(permit);
            next.run(request).await
        }
        Err(CallLimitError::GlobalLimitReached) => {
            tracing::warn!(
                active_calls = state.active_calls(),
                "Rejecting call: concurrent call limit reached"
            );
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Server at capacity. Please try again later.",
            )
                .into_response()
        }
    }
}
