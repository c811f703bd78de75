//! In-memory sockets for driving the relay in unit tests.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use std::time::Duration;

use base64::{Engine, prelude::BASE64_STANDARD};
use futures::Sink;
use futures::channel::mpsc::{UnboundedSender, unbounded};
use serde_json::Value;
use tokio::task::JoinHandle;

use super::error::{BridgeError, BridgeResult, CloseReason};
use super::relay::run_relay;
use super::session::{BridgeConfig, CallSession};
use super::transport::TransportEvent;

#[derive(Default)]
struct Recorded {
    messages: Vec<String>,
    closes: usize,
    stalled: bool,
}

/// Sink that records every message and counts close calls.
#[derive(Clone, Default)]
pub struct RecordingSink {
    recorded: Arc<Mutex<Recorded>>,
    fail_sends: bool,
    stall_close: bool,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail_sends: true,
            ..Default::default()
        }
    }

    /// Sink whose close never completes, like a peer with a stalled window.
    pub fn stalled_close() -> Self {
        Self {
            stall_close: true,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.recorded.lock().unwrap().messages.clone()
    }

    pub fn close_count(&self) -> usize {
        self.recorded.lock().unwrap().closes
    }
}

impl Sink<String> for RecordingSink {
    type Error = BridgeError;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if self.fail_sends {
            return Poll::Ready(Err(BridgeError::ModelSocket("send failed".to_string())));
        }
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: String) -> Result<(), Self::Error> {
        self.recorded.lock().unwrap().messages.push(item);
        Ok(())
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        let mut recorded = self.recorded.lock().unwrap();
        if self.stall_close {
            // Count the attempt once; later polls are the same close
            if !recorded.stalled {
                recorded.stalled = true;
                recorded.closes += 1;
            }
            return Poll::Pending;
        }
        recorded.closes += 1;
        Poll::Ready(Ok(()))
    }
}

type EventSender = UnboundedSender<BridgeResult<TransportEvent>>;

/// A relay running on a spawned task with both sides scripted by the test.
pub struct Harness {
    telephony_in: EventSender,
    model_in: EventSender,
    pub telephony_out: RecordingSink,
    pub model_out: RecordingSink,
    handle: JoinHandle<(CloseReason, CallSession)>,
}

impl Harness {
    pub fn start(config: BridgeConfig) -> Self {
        Self::spawn(config, RecordingSink::default())
    }

    pub fn start_with_failing_model(config: BridgeConfig) -> Self {
        Self::spawn(config, RecordingSink::failing())
    }

    fn spawn(config: BridgeConfig, model_out: RecordingSink) -> Self {
        Self::start_with_sinks(config, RecordingSink::default(), model_out)
    }

    pub fn start_with_sinks(
        config: BridgeConfig,
        telephony_out: RecordingSink,
        model_out: RecordingSink,
    ) -> Self {
        let (telephony_in, telephony_rx) = unbounded();
        let (model_in, model_rx) = unbounded();

        let telephony_tx = telephony_out.clone();
        let model_tx = model_out.clone();
        let handle = tokio::spawn(async move {
            let mut session = CallSession::new(config);
            let reason = run_relay(&mut session, telephony_rx, telephony_tx, model_rx, model_tx).await;
            (reason, session)
        });

        Self {
            telephony_in,
            model_in,
            telephony_out,
            model_out,
            handle,
        }
    }

    pub fn telephony(&self, text: &str) {
        let _ = self
            .telephony_in
            .unbounded_send(Ok(TransportEvent::Text(text.to_string())));
    }

    pub fn model(&self, text: &str) {
        self.model_event(TransportEvent::Text(text.to_string()));
    }

    pub fn model_event(&self, event: TransportEvent) {
        let _ = self.model_in.unbounded_send(Ok(event));
    }

    pub fn model_error(&self, message: &str) {
        let _ = self
            .model_in
            .unbounded_send(Err(BridgeError::ModelSocket(message.to_string())));
    }

    pub fn close_telephony(&self) {
        self.telephony_in.close_channel();
    }

    pub fn close_model(&self) {
        self.model_in.close_channel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the relay to end. Input channels stay open until it does.
    pub async fn finish(self) -> (CloseReason, CallSession) {
        let Harness {
            telephony_in,
            model_in,
            handle,
            ..
        } = self;
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("relay did not finish")
            .expect("relay task panicked");
        drop((telephony_in, model_in));
        result
    }
}

/// Let the relay task drain everything currently queued.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Telephony `media` event carrying `len` silent μ-law bytes.
pub fn media_event(len: usize) -> String {
    let payload = BASE64_STANDARD.encode(vec![0xFFu8; len]);
    format!(r#"{{"event":"media","media":{{"payload":"{payload}"}}}}"#)
}

/// Model output-audio event carrying `samples` silent PCM16 samples.
pub fn audio_delta(samples: usize) -> String {
    let audio = BASE64_STANDARD.encode(vec![0u8; samples * 2]);
    format!(r#"{{"type":"response.output_audio.delta","delta":"{audio}"}}"#)
}

pub fn event_type(json: &str) -> String {
    let value: Value = serde_json::from_str(json).unwrap();
    value["type"].as_str().unwrap_or_default().to_string()
}
