//! HTTP and WebSocket request handlers
//!
//! - `api` - Health check endpoint
//! - `media_stream` - Telephony media-stream WebSocket bridged to the realtime model

pub mod api;
pub mod media_stream;

pub use api::health_check;
pub use media_stream::media_stream_handler;
