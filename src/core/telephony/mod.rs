//! Telephony media-stream protocol.
//!
//! Wire types for the JSON control-message socket the telephony platform
//! opens toward the bridge. The bridge never interprets call semantics; it
//! only reads the stream identifier and audio payloads.

pub mod messages;

pub use messages::{
    InboundMedia, MediaFormat, OutboundMedia, StreamStart, StreamStop, TelephonyInbound,
    TelephonyOutbound,
};
