//! Session bridge between a telephony media stream and a realtime model.
//!
//! # Modules
//! - `session`: per-call state machine, turn-taking and pending-output queue
//! - `relay`: duplex pump and paired teardown
//! - `transport`: WebSocket adapters feeding the relay
//! - `error`: transport errors and close reasons

mod error;
pub mod relay;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{BridgeError, BridgeResult, CloseReason};
pub use relay::run_relay;
pub use session::{
    Action, BridgeConfig, BridgeState, CallSession, DEFAULT_CLOSE_TIMEOUT, DEFAULT_INSTRUCTIONS,
    DEFAULT_MAX_PENDING_FRAMES, DEFAULT_TURN_CADENCE, OverflowPolicy, SessionStats,
};
pub use transport::{TransportEvent, model_transport, telephony_transport};
