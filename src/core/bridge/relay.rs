//! Duplex message pump for one call.
//!
//! [`run_relay`] drives a [`CallSession`] from two socket halves until either
//! side closes, errors, or the session asks to end. Both sinks are then closed
//! exactly once. Per-frame transcoding runs to completion inside the loop, so
//! the only suspension points are socket reads and writes.

use futures::{Sink, SinkExt, Stream, StreamExt};
use serde::Serialize;
use tokio::select;
use tokio::time::{Instant, sleep_until, timeout};
use tracing::{debug, info, warn};

use super::error::{BridgeError, BridgeResult, CloseReason};
use super::session::{Action, CallSession};
use super::transport::TransportEvent;

/// Run a call to completion and return why it ended.
///
/// The session must be freshly created; the initial `session.update` is sent
/// before either stream is read.
pub async fn run_relay<TelRx, TelTx, ModelRx, ModelTx>(
    session: &mut CallSession,
    mut telephony_rx: TelRx,
    mut telephony_tx: TelTx,
    mut model_rx: ModelRx,
    mut model_tx: ModelTx,
) -> CloseReason
where
    TelRx: Stream<Item = BridgeResult<TransportEvent>> + Unpin,
    TelTx: Sink<String, Error = BridgeError> + Unpin,
    ModelRx: Stream<Item = BridgeResult<TransportEvent>> + Unpin,
    ModelTx: Sink<String, Error = BridgeError> + Unpin,
{
    let start_deadline = session
        .config()
        .start_timeout
        .map(|timeout| Instant::now() + timeout);

    let initial = session.on_model_connected();
    let outcome = match dispatch(initial, &mut telephony_tx, &mut model_tx).await {
        Some(reason) => reason,
        None => loop {
            select! {
                message = telephony_rx.next() => {
                    let actions = match message {
                        Some(Ok(TransportEvent::Text(text))) => session.handle_telephony_text(&text),
                        Some(Ok(TransportEvent::Ignored)) => continue,
                        Some(Ok(TransportEvent::Close)) | None => {
                            info!(session_id = %session.id(), "Telephony socket closed");
                            break CloseReason::TelephonyClosed;
                        }
                        Some(Err(e)) => {
                            warn!(session_id = %session.id(), error = %e, "Telephony socket error");
                            break CloseReason::TelephonyError;
                        }
                    };
                    if let Some(reason) = dispatch(actions, &mut telephony_tx, &mut model_tx).await {
                        break reason;
                    }
                }
                message = model_rx.next() => {
                    let actions = match message {
                        Some(Ok(TransportEvent::Text(text))) => session.handle_model_text(&text),
                        Some(Ok(TransportEvent::Ignored)) => continue,
                        Some(Ok(TransportEvent::Close)) | None => {
                            info!(session_id = %session.id(), "Model socket closed");
                            break CloseReason::ModelClosed;
                        }
                        Some(Err(e)) => {
                            warn!(session_id = %session.id(), error = %e, "Model socket error");
                            break CloseReason::ModelError;
                        }
                    };
                    if let Some(reason) = dispatch(actions, &mut telephony_tx, &mut model_tx).await {
                        break reason;
                    }
                }
                _ = wait_until(start_deadline), if session.awaiting_start() => {
                    warn!(session_id = %session.id(), "No start event before deadline");
                    break CloseReason::StartTimeout;
                }
            }
        },
    };

    teardown(session, outcome, &mut telephony_tx, &mut model_tx).await;
    outcome
}

/// Perform session actions in order. Returns a close reason if the session
/// must end.
async fn dispatch<TelTx, ModelTx>(
    actions: Vec<Action>,
    telephony_tx: &mut TelTx,
    model_tx: &mut ModelTx,
) -> Option<CloseReason>
where
    TelTx: Sink<String, Error = BridgeError> + Unpin,
    ModelTx: Sink<String, Error = BridgeError> + Unpin,
{
    for action in actions {
        match action {
            Action::ToModel(event) => {
                let json = match to_json(&event) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(event = event.event_type(), error = %e, "Failed to serialize model event");
                        continue;
                    }
                };
                debug!(event = event.event_type(), "Sending to model");
                if let Err(e) = model_tx.send(json).await {
                    warn!(error = %e, "Failed to send to model");
                    return Some(CloseReason::ModelError);
                }
            }
            Action::ToTelephony(frame) => {
                let json = match to_json(&frame) {
                    Ok(json) => json,
                    Err(e) => {
                        warn!(error = %e, "Failed to serialize telephony frame");
                        continue;
                    }
                };
                if let Err(e) = telephony_tx.send(json).await {
                    warn!(error = %e, "Failed to send to telephony");
                    return Some(CloseReason::TelephonyError);
                }
            }
            Action::Close(reason) => return Some(reason),
        }
    }
    None
}

fn to_json<T: Serialize>(value: &T) -> BridgeResult<String> {
    Ok(serde_json::to_string(value)?)
}

/// Close both sides once. Secondary close errors are logged and dropped.
async fn teardown<TelTx, ModelTx>(
    session: &mut CallSession,
    reason: CloseReason,
    telephony_tx: &mut TelTx,
    model_tx: &mut ModelTx,
) where
    TelTx: Sink<String, Error = BridgeError> + Unpin,
    ModelTx: Sink<String, Error = BridgeError> + Unpin,
{
    if !session.begin_close(reason) {
        return;
    }

    let close_timeout = session.config().close_timeout;
    match timeout(close_timeout, model_tx.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!(session_id = %session.id(), error = %e, "Model socket close failed"),
        Err(_) => warn!(session_id = %session.id(), "Model socket close timed out"),
    }
    match timeout(close_timeout, telephony_tx.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => debug!(session_id = %session.id(), error = %e, "Telephony socket close failed"),
        Err(_) => warn!(session_id = %session.id(), "Telephony socket close timed out"),
    }
    session.finish_close();

    let stats = session.stats();
    info!(
        session_id = %session.id(),
        stream_sid = session.stream_sid().unwrap_or("-"),
        reason = %reason,
        media_in = stats.media_in,
        audio_out = stats.audio_out,
        turns = stats.turns,
        frames_dropped = stats.frames_dropped,
        malformed = stats.malformed,
        "Call session closed"
    );
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
