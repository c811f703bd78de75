//! OpenAI Realtime API WebSocket message types.
//!
//! Only the subset of the protocol the bridge drives is modelled.
//!
//! Client events (sent to server):
//! - session.update - Session instructions and voice
//! - input_audio_buffer.append - Append PCM16 audio to the input buffer
//! - input_audio_buffer.commit - Close the current turn's input
//! - response.create - Request a response over committed input
//!
//! Server events (received from server):
//! - response.audio.delta / response.output_audio.delta - Output audio chunk
//! - response.done / response.completed - Response finished
//! - error - Application error reported by the service
//!
//! Every other server event is accepted and ignored.

use serde::{Deserialize, Serialize};

use super::config::Modality;

// =============================================================================
// Session Configuration
// =============================================================================

/// Session configuration sent with `session.update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// System instructions for the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// Voice for audio output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,

    /// Response modalities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<Modality>>,

    /// Server-side turn detection. `Some(None)` sends `null`, which turns it
    /// off so that only explicit commits produce responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_detection: Option<Option<TurnDetection>>,
}

/// Server-side turn detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnDetection {
    /// Voice-activity based turn detection
    #[serde(rename = "server_vad")]
    ServerVad {
        /// Activation threshold
        #[serde(skip_serializing_if = "Option::is_none")]
        threshold: Option<f32>,
        /// Silence duration in ms
        #[serde(skip_serializing_if = "Option::is_none")]
        silence_duration_ms: Option<u32>,
        /// Whether to create a response on turn end
        #[serde(skip_serializing_if = "Option::is_none")]
        create_response: Option<bool>,
    },
    /// Semantic turn detection
    #[serde(rename = "semantic_vad")]
    SemanticVad {
        /// Eagerness level
        #[serde(skip_serializing_if = "Option::is_none")]
        eagerness: Option<String>,
    },
}

/// Response configuration sent with `response.create`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Requested output modalities
    pub modalities: Vec<Modality>,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            modalities: Modality::audio_and_text(),
        }
    }
}

// =============================================================================
// Client Events
// =============================================================================

/// Event sent from the bridge to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Update session configuration
    #[serde(rename = "session.update")]
    SessionUpdate {
        /// Session configuration
        session: SessionConfig,
    },

    /// Append audio to the input buffer
    #[serde(rename = "input_audio_buffer.append")]
    InputAudioBufferAppend {
        /// Base64 PCM16 audio
        audio: String,
    },

    /// Commit the input buffer
    #[serde(rename = "input_audio_buffer.commit")]
    InputAudioBufferCommit,

    /// Request a response
    #[serde(rename = "response.create")]
    ResponseCreate {
        /// Response configuration
        response: ResponseConfig,
    },
}

impl ClientEvent {
    /// Event type string as it appears on the wire.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionUpdate { .. } => "session.update",
            Self::InputAudioBufferAppend { .. } => "input_audio_buffer.append",
            Self::InputAudioBufferCommit => "input_audio_buffer.commit",
            Self::ResponseCreate { .. } => "response.create",
        }
    }
}

// =============================================================================
// Server Events
// =============================================================================

/// Error details carried by an `error` event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Machine-readable code
    #[serde(default)]
    pub code: Option<String>,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Offending parameter
    #[serde(default)]
    pub param: Option<String>,
    /// Client event that triggered the error
    #[serde(default)]
    pub event_id: Option<String>,
}

/// Event received from the model.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Error occurred
    #[serde(rename = "error")]
    Error {
        /// Error details
        #[serde(default)]
        error: ApiError,
    },

    /// Output audio chunk
    #[serde(
        rename = "response.audio.delta",
        alias = "response.output_audio.delta"
    )]
    AudioDelta {
        /// Base64 PCM16 audio
        #[serde(alias = "delta")]
        audio: String,
        /// Response ID
        #[serde(default)]
        response_id: Option<String>,
        /// Item ID
        #[serde(default)]
        item_id: Option<String>,
    },

    /// Response complete
    #[serde(rename = "response.done", alias = "response.completed")]
    ResponseDone {
        /// Response body
        #[serde(default)]
        response: Option<serde_json::Value>,
    },

    /// Any other server event
    #[serde(other)]
    Other,
}
