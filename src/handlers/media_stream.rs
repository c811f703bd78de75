//! Telephony media-stream WebSocket handler
//!
//! Each accepted upgrade becomes one call: the handler opens a model socket
//! through the configured connector, then hands both sockets to the relay.
//! If the model socket cannot be opened the telephony socket is closed and
//! no relay is started.

use axum::{
    Extension,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};

use crate::core::bridge::{
    CallSession, CloseReason, model_transport, run_relay, telephony_transport,
};
use crate::core::realtime::{ModelSocket, RealtimeError, RealtimeResult};
use crate::state::{AppState, CallPermit};

/// Maximum WebSocket message size (1 MB)
const MAX_WS_MESSAGE_SIZE: usize = 1024 * 1024;

/// Media-stream WebSocket handler
///
/// Upgrades the HTTP connection to WebSocket and bridges it to the realtime
/// model for the lifetime of the call. The `CallPermit` inserted by the call
/// limit middleware is held until the call ends.
pub async fn media_stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    permit: Option<Extension<CallPermit>>,
) -> Response {
    info!("Media stream WebSocket upgrade requested");

    let permit = permit.map(|Extension(permit)| permit);
    ws.max_message_size(MAX_WS_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_media_stream(socket, state, permit))
}

async fn handle_media_stream(socket: WebSocket, state: Arc<AppState>, permit: Option<CallPermit>) {
    let session = CallSession::new(state.config.bridge_config());
    let span = info_span!("call", session_id = %session.id());

    bridge_call(socket, state, session).instrument(span).await;
    drop(permit);
}

async fn bridge_call(mut socket: WebSocket, state: Arc<AppState>, mut session: CallSession) {
    info!(
        provider = state.connector.provider_name(),
        active_calls = state.active_calls(),
        "Telephony stream connected, opening model socket"
    );

    let model_socket = match connect_model(&state, &session).await {
        Ok(model_socket) => model_socket,
        Err(e) => {
            error!(error = %e, "Failed to open model socket, closing telephony stream");
            session.begin_close(CloseReason::ConnectFailed);
            let _ = socket.send(Message::Close(None)).await;
            session.finish_close();
            return;
        }
    };

    let (telephony_tx, telephony_rx) = telephony_transport(socket);
    let (model_tx, model_rx) = model_transport(model_socket);

    let reason = run_relay(&mut session, telephony_rx, telephony_tx, model_rx, model_tx).await;
    info!(reason = %reason, "Media stream terminated");
}

async fn connect_model(state: &AppState, session: &CallSession) -> RealtimeResult<ModelSocket> {
    let connect = state.connector.connect();

    match session.config().connect_timeout {
        Some(timeout) => tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| {
                RealtimeError::Timeout(format!("model connect after {}s", timeout.as_secs_f32()))
            })?,
        None => connect.await,
    }
}
