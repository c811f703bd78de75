//! Telephony media-stream WebSocket message types.
//!
//! The telephony platform sends JSON text frames tagged by an `event` field:
//!
//! - connected - Stream socket established
//! - start - Stream metadata, carries the `streamSid`
//! - media - One chunk of base64 μ-law 8 kHz audio
//! - mark - Playback marker acknowledgement
//! - stop - Stream ended
//!
//! Outbound, the bridge only sends `media` frames, each echoing the `streamSid`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// Inbound (platform -> bridge)
// =============================================================================

/// Event received from the telephony platform.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TelephonyInbound {
    /// Socket handshake notice sent before `start`
    Connected {
        #[serde(default)]
        protocol: Option<String>,
        #[serde(default)]
        version: Option<String>,
    },

    /// Stream started
    Start {
        /// Stream metadata
        start: StreamStart,
    },

    /// Audio chunk
    Media {
        /// Media payload
        media: InboundMedia,
    },

    /// Playback marker reached
    Mark {
        #[serde(default)]
        mark: Option<MarkPayload>,
    },

    /// Stream stopped
    Stop {
        #[serde(default)]
        stop: Option<StreamStop>,
    },

    /// Any other event kind
    #[serde(other)]
    Unknown,
}

/// Metadata carried by a `start` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStart {
    /// Stream identifier, echoed on every outbound media frame
    pub stream_sid: String,
    #[serde(default)]
    pub call_sid: Option<String>,
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default)]
    pub tracks: Vec<String>,
    #[serde(default)]
    pub custom_parameters: HashMap<String, String>,
    #[serde(default)]
    pub media_format: Option<MediaFormat>,
}

/// Audio format announced in the `start` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFormat {
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub channels: Option<u16>,
}

/// Payload of an inbound `media` event.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMedia {
    /// Base64 μ-law audio
    pub payload: String,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub chunk: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Payload of a `mark` event.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkPayload {
    #[serde(default)]
    pub name: Option<String>,
}

/// Payload of a `stop` event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStop {
    #[serde(default)]
    pub call_sid: Option<String>,
}

// =============================================================================
// Outbound (bridge -> platform)
// =============================================================================

/// Event sent to the telephony platform.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum TelephonyOutbound {
    /// Audio chunk for playback on the call
    Media {
        #[serde(rename = "streamSid")]
        stream_sid: String,
        media: OutboundMedia,
    },
}

/// Payload of an outbound `media` event.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundMedia {
    /// Base64 μ-law audio
    pub payload: String,
}

impl TelephonyOutbound {
    /// Build a media frame for the given stream.
    pub fn media(stream_sid: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::Media {
            stream_sid: stream_sid.into(),
            media: OutboundMedia {
                payload: payload.into(),
            },
        }
    }
}
