//! Router construction.

pub mod media_stream;

use axum::{Router, middleware, routing::get};
use std::sync::Arc;

use crate::handlers::api::health_check;
use crate::middleware::call_limit_middleware;
use crate::state::AppState;

/// Build the complete application router.
///
/// - `GET /` health check (no limit)
/// - `GET /ws/twilio` media-stream upgrade behind the call limit
pub fn create_app(state: Arc<AppState>) -> Router {
    let public_routes = Router::new().route("/", get(health_check));

    let media_routes = media_stream::create_media_stream_router().layer(
        middleware::from_fn_with_state(state.clone(), call_limit_middleware),
    );

    public_routes.merge(media_routes).with_state(state)
}
