//! OpenAI Realtime API provider.
//!
//! # Audio Format
//!
//! The bridge streams PCM 16-bit signed little-endian mono at 16kHz in both
//! directions, base64-encoded inside JSON events.
//!
//! # Example
//!
//! ```rust,ignore
//! use voice_bridge::core::realtime::{OpenAIRealtimeConnector, RealtimeConfig, RealtimeConnector};
//!
//! let connector = OpenAIRealtimeConnector::new(RealtimeConfig {
//!     api_key: "sk-...".to_string(),
//!     model: "gpt-4o-realtime-preview".to_string(),
//!     ..Default::default()
//! })?;
//! let socket = connector.connect().await?;
//! ```

mod config;
mod connector;
mod messages;

pub use config::{DEFAULT_REALTIME_MODEL, Modality, OPENAI_BETA_HEADER_VALUE, OPENAI_REALTIME_URL};
pub use connector::OpenAIRealtimeConnector;
pub use messages::{
    ApiError, ClientEvent, ResponseConfig, ServerEvent, SessionConfig, TurnDetection,
};
