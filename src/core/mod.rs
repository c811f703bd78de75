pub mod audio;
pub mod bridge;
pub mod realtime;
pub mod telephony;

// Re-export commonly used types for convenience
pub use audio::{TranscodeError, TranscodeResult, model_to_telephony, telephony_to_model};

pub use bridge::{BridgeConfig, BridgeError, CallSession, CloseReason, OverflowPolicy, run_relay};

pub use realtime::{
    BoxedConnector, OpenAIRealtimeConnector, RealtimeConfig, RealtimeConnector, RealtimeError,
    RealtimeResult,
};

pub use telephony::{TelephonyInbound, TelephonyOutbound};
