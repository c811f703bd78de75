//! Socket adapters for the relay.
//!
//! The relay only deals in JSON text. These adapters split each WebSocket
//! into a `Sink<String>` and a `Stream` of [`TransportEvent`]s, mapping
//! transport errors onto the side they came from.

use axum::extract::ws::{Message as AxumMessage, WebSocket};
use futures::future;
use futures::{Sink, SinkExt, Stream, StreamExt};
use tokio_tungstenite::tungstenite::Message as WsMessage;

use super::error::{BridgeError, BridgeResult};
use crate::core::realtime::ModelSocket;

/// What the relay sees of one inbound WebSocket frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// JSON text frame
    Text(String),
    /// Peer sent a close frame
    Close,
    /// Binary, ping and pong frames
    Ignored,
}

impl From<AxumMessage> for TransportEvent {
    fn from(message: AxumMessage) -> Self {
        match message {
            AxumMessage::Text(text) => Self::Text(text.as_str().to_owned()),
            AxumMessage::Close(_) => Self::Close,
            AxumMessage::Binary(_) | AxumMessage::Ping(_) | AxumMessage::Pong(_) => Self::Ignored,
        }
    }
}

impl From<WsMessage> for TransportEvent {
    fn from(message: WsMessage) -> Self {
        match message {
            WsMessage::Text(text) => Self::Text(text.as_str().to_owned()),
            WsMessage::Close(_) => Self::Close,
            WsMessage::Binary(_) | WsMessage::Ping(_) | WsMessage::Pong(_) | WsMessage::Frame(_) => {
                Self::Ignored
            }
        }
    }
}

/// Split the accepted telephony socket into text sink and event stream.
pub fn telephony_transport(
    socket: WebSocket,
) -> (
    impl Sink<String, Error = BridgeError> + Unpin,
    impl Stream<Item = BridgeResult<TransportEvent>> + Unpin,
) {
    let (sink, stream) = socket.split();

    let sink = sink
        .sink_map_err(|e| BridgeError::TelephonySocket(e.to_string()))
        .with(|text: String| future::ready(Ok::<_, BridgeError>(AxumMessage::Text(text.into()))));

    let stream = stream.map(|message| {
        message
            .map(TransportEvent::from)
            .map_err(|e| BridgeError::TelephonySocket(e.to_string()))
    });

    (sink, stream)
}

/// Split the upstream model socket into text sink and event stream.
pub fn model_transport(
    socket: ModelSocket,
) -> (
    impl Sink<String, Error = BridgeError> + Unpin,
    impl Stream<Item = BridgeResult<TransportEvent>> + Unpin,
) {
    let (sink, stream) = socket.split();

    let sink = sink
        .sink_map_err(|e| BridgeError::ModelSocket(e.to_string()))
        .with(|text: String| future::ready(Ok::<_, BridgeError>(WsMessage::Text(text.into()))));

    let stream = stream.map(|message| {
        message
            .map(TransportEvent::from)
            .map_err(|e| BridgeError::ModelSocket(e.to_string()))
    });

    (sink, stream)
}
