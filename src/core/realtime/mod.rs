//! Upstream realtime model connection.
//!
//! A [`RealtimeConnector`] opens one model socket per call. The OpenAI
//! implementation is the only provider. Tests point it at a local mock
//! server through the configured URL.

mod base;
pub mod openai;

pub use base::{
    BoxedConnector, ModelSocket, RealtimeConfig, RealtimeConnector, RealtimeError, RealtimeResult,
};
pub use openai::{ClientEvent, Modality, OpenAIRealtimeConnector, ServerEvent};
