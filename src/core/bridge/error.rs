use thiserror::Error;

/// Errors raised by the socket transports a session drives.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Telephony socket failed to read or write
    #[error("Telephony socket error: {0}")]
    TelephonySocket(String),

    /// Model socket failed to read or write
    #[error("Model socket error: {0}")]
    ModelSocket(String),

    /// Outbound event could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for bridge transport operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Why a call session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Telephony side closed its socket
    TelephonyClosed,
    /// Model side closed its socket
    ModelClosed,
    /// Telephony socket failed
    TelephonyError,
    /// Model socket failed
    ModelError,
    /// Model socket could not be opened
    ConnectFailed,
    /// No `start` event arrived in time
    StartTimeout,
    /// Stream stopped and the final response completed
    CallEnded,
    /// Pending-output queue overflowed under the close policy
    PendingOverflow,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TelephonyClosed => "telephony_closed",
            Self::ModelClosed => "model_closed",
            Self::TelephonyError => "telephony_error",
            Self::ModelError => "model_error",
            Self::ConnectFailed => "connect_failed",
            Self::StartTimeout => "start_timeout",
            Self::CallEnded => "call_ended",
            Self::PendingOverflow => "pending_overflow",
        }
    }
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
