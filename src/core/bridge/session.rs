//! Per-call bridging state machine.
//!
//! [`CallSession`] owns everything one call needs between the two sockets:
//! the stream identifier, the turn accumulator, and the queue of output frames
//! produced before the identifier is known. It performs no I/O. Each handler
//! returns the [`Action`]s the relay must perform, in order.

use std::collections::VecDeque;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::error::CloseReason;
use crate::core::audio::{model_to_telephony, telephony_to_model};
use crate::core::realtime::openai::{ClientEvent, ResponseConfig, ServerEvent, SessionConfig};
use crate::core::telephony::{TelephonyInbound, TelephonyOutbound};

/// Media chunks per turn when not configured.
pub const DEFAULT_TURN_CADENCE: u32 = 15;

/// Pending-output capacity when not configured.
pub const DEFAULT_MAX_PENDING_FRAMES: usize = 500;

/// Deadline for closing each socket at teardown when not configured.
pub const DEFAULT_CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Assistant persona sent in `session.update` when not configured.
pub const DEFAULT_INSTRUCTIONS: &str = "Ти си кратък гласов асистент за градски транспорт в България.\n\
Говори на езика на обаждащия. Питай откъде, докъде, кога.\n\
Кратки изречения. Предложи такси при нужда.\n\
Накрая попитай: \"Да изпратя ли маршрута по SMS?\" и \"Да извикам ли такси?\"";

// =============================================================================
// Configuration
// =============================================================================

/// What to do when the pending-output queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Discard the oldest queued frame to make room
    #[default]
    DropOldest,
    /// Tear the session down
    Close,
}

impl OverflowPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropOldest => "drop_oldest",
            Self::Close => "close",
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop_oldest" | "drop-oldest" => Ok(Self::DropOldest),
            "close" => Ok(Self::Close),
            other => Err(format!(
                "Unknown overflow policy '{other}', expected 'drop_oldest' or 'close'"
            )),
        }
    }
}

/// Per-session operating parameters.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Media chunks accumulated before a turn is committed (at least 1)
    pub turn_cadence: u32,
    /// Instructions sent in `session.update`
    pub instructions: String,
    /// Output voice, provider default when `None`
    pub voice: Option<String>,
    /// Maximum frames held while waiting for `start`
    pub max_pending_frames: usize,
    pub overflow_policy: OverflowPolicy,
    /// Deadline for the model socket to open, `None` waits indefinitely
    pub connect_timeout: Option<Duration>,
    /// Deadline for the `start` event, `None` waits indefinitely
    pub start_timeout: Option<Duration>,
    /// Deadline for each socket close at teardown
    pub close_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            turn_cadence: DEFAULT_TURN_CADENCE,
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            voice: None,
            max_pending_frames: DEFAULT_MAX_PENDING_FRAMES,
            overflow_policy: OverflowPolicy::DropOldest,
            connect_timeout: Some(Duration::from_secs(10)),
            start_timeout: Some(Duration::from_secs(30)),
            close_timeout: DEFAULT_CLOSE_TIMEOUT,
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Lifecycle of a call session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Waiting for the model socket
    Connecting,
    /// Model configured, waiting for the telephony `start` event
    AwaitingStart,
    /// Streaming in both directions
    Active,
    /// One side ended, tearing down
    Closing,
    /// Both sockets closed
    Closed,
}

/// Side effect requested by the session.
#[derive(Debug, Clone)]
pub enum Action {
    /// Send an event on the model socket
    ToModel(ClientEvent),
    /// Send a frame on the telephony socket
    ToTelephony(TelephonyOutbound),
    /// End the session
    Close(CloseReason),
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Media events forwarded to the model
    pub media_in: u64,
    /// Audio frames delivered to the telephony side
    pub audio_out: u64,
    /// Frames discarded from a full pending queue
    pub frames_dropped: u64,
    /// Turns committed (cadence and stop)
    pub turns: u64,
    /// Inbound messages dropped as malformed
    pub malformed: u64,
}

/// State of one bridged call.
#[derive(Debug)]
pub struct CallSession {
    id: Uuid,
    config: BridgeConfig,
    state: BridgeState,
    stream_sid: Option<String>,
    turn_chunks: u32,
    pending: VecDeque<String>,
    stop_received: bool,
    open_responses: u32,
    close_reason: Option<CloseReason>,
    stats: SessionStats,
}

impl CallSession {
    pub fn new(config: BridgeConfig) -> Self {
        let config = BridgeConfig {
            turn_cadence: config.turn_cadence.max(1),
            max_pending_frames: config.max_pending_frames.max(1),
            ..config
        };

        Self {
            id: Uuid::new_v4(),
            config,
            state: BridgeState::Connecting,
            stream_sid: None,
            turn_chunks: 0,
            pending: VecDeque::new(),
            stop_received: false,
            open_responses: 0,
            close_reason: None,
            stats: SessionStats::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn stream_sid(&self) -> Option<&str> {
        self.stream_sid.as_deref()
    }

    /// Media chunks received since the last commit.
    pub fn turn_chunks(&self) -> u32 {
        self.turn_chunks
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.state, BridgeState::Closing | BridgeState::Closed)
    }

    /// Whether the `start` deadline still applies.
    pub fn awaiting_start(&self) -> bool {
        self.stream_sid.is_none() && !self.is_closing()
    }

    /// Model socket is open: emit the one-time session configuration.
    pub fn on_model_connected(&mut self) -> Vec<Action> {
        if self.state != BridgeState::Connecting {
            return Vec::new();
        }
        self.state = BridgeState::AwaitingStart;

        let session = SessionConfig {
            instructions: Some(self.config.instructions.clone()),
            voice: self.config.voice.clone(),
            modalities: None,
            // Turns are committed by cadence and stop only
            turn_detection: Some(None),
        };
        vec![Action::ToModel(ClientEvent::SessionUpdate { session })]
    }

    /// Handle one raw text frame from the telephony socket.
    pub fn handle_telephony_text(&mut self, text: &str) -> Vec<Action> {
        if self.is_closing() {
            return Vec::new();
        }
        match serde_json::from_str::<TelephonyInbound>(text) {
            Ok(message) => self.handle_telephony(message),
            Err(e) => {
                self.stats.malformed += 1;
                warn!(session_id = %self.id, error = %e, "Dropping malformed telephony message");
                Vec::new()
            }
        }
    }

    pub fn handle_telephony(&mut self, message: TelephonyInbound) -> Vec<Action> {
        if self.is_closing() {
            return Vec::new();
        }

        match message {
            TelephonyInbound::Start { start } => self.on_start(start.stream_sid),
            TelephonyInbound::Media { media } => self.on_media(&media.payload),
            TelephonyInbound::Stop { .. } => self.on_stop(),
            TelephonyInbound::Connected { .. } | TelephonyInbound::Mark { .. } => Vec::new(),
            TelephonyInbound::Unknown => {
                debug!(session_id = %self.id, "Ignoring unknown telephony event");
                Vec::new()
            }
        }
    }

    /// Handle one raw text frame from the model socket.
    pub fn handle_model_text(&mut self, text: &str) -> Vec<Action> {
        if self.is_closing() {
            return Vec::new();
        }
        match serde_json::from_str::<ServerEvent>(text) {
            Ok(event) => self.handle_model(event),
            Err(e) => {
                self.stats.malformed += 1;
                warn!(session_id = %self.id, error = %e, "Dropping malformed model event");
                Vec::new()
            }
        }
    }

    pub fn handle_model(&mut self, event: ServerEvent) -> Vec<Action> {
        if self.is_closing() {
            return Vec::new();
        }

        match event {
            ServerEvent::AudioDelta { audio, .. } => self.on_audio_delta(&audio),
            ServerEvent::ResponseDone { .. } => self.on_response_done(),
            ServerEvent::Error { error } => {
                error!(
                    session_id = %self.id,
                    error_type = ?error.error_type,
                    code = ?error.code,
                    message = %error.message,
                    "Realtime model reported an error"
                );
                Vec::new()
            }
            ServerEvent::Other => Vec::new(),
        }
    }

    /// Enter `Closing`. Returns `false` if the session was already closing.
    pub fn begin_close(&mut self, reason: CloseReason) -> bool {
        if self.is_closing() {
            return false;
        }
        self.state = BridgeState::Closing;
        self.close_reason = Some(reason);
        true
    }

    pub fn finish_close(&mut self) {
        self.state = BridgeState::Closed;
        self.pending.clear();
    }

    fn on_start(&mut self, stream_sid: String) -> Vec<Action> {
        if let Some(previous) = &self.stream_sid {
            warn!(session_id = %self.id, previous = %previous, stream_sid = %stream_sid, "Replacing stream SID");
        }
        info!(session_id = %self.id, stream_sid = %stream_sid, flushed = self.pending.len(), "Telephony stream started");

        let actions = self
            .pending
            .drain(..)
            .map(|payload| Action::ToTelephony(TelephonyOutbound::media(stream_sid.as_str(), payload)))
            .collect::<Vec<_>>();
        self.stats.audio_out += actions.len() as u64;

        self.stream_sid = Some(stream_sid);
        self.state = BridgeState::Active;
        actions
    }

    fn on_media(&mut self, payload: &str) -> Vec<Action> {
        if self.stop_received {
            debug!(session_id = %self.id, "Ignoring media after stop");
            return Vec::new();
        }

        let audio = match telephony_to_model(payload) {
            Ok(audio) => audio,
            Err(e) => {
                self.stats.malformed += 1;
                warn!(session_id = %self.id, error = %e, "Dropping undecodable media payload");
                return Vec::new();
            }
        };

        self.stats.media_in += 1;
        self.turn_chunks += 1;

        let mut actions = vec![Action::ToModel(ClientEvent::InputAudioBufferAppend { audio })];
        if self.turn_chunks >= self.config.turn_cadence {
            debug!(session_id = %self.id, chunks = self.turn_chunks, "Committing turn");
            actions.extend(self.commit_turn());
        }
        actions
    }

    fn on_stop(&mut self) -> Vec<Action> {
        if self.stop_received {
            return Vec::new();
        }
        info!(session_id = %self.id, chunks = self.turn_chunks, "Telephony stream stopped, committing final turn");
        self.stop_received = true;
        self.commit_turn().into()
    }

    fn on_audio_delta(&mut self, audio: &str) -> Vec<Action> {
        let payload = match model_to_telephony(audio) {
            Ok(payload) => payload,
            Err(e) => {
                self.stats.malformed += 1;
                warn!(session_id = %self.id, error = %e, "Dropping undecodable model audio");
                return Vec::new();
            }
        };

        if let Some(stream_sid) = &self.stream_sid {
            self.stats.audio_out += 1;
            return vec![Action::ToTelephony(TelephonyOutbound::media(
                stream_sid.as_str(),
                payload,
            ))];
        }

        if self.pending.len() >= self.config.max_pending_frames {
            match self.config.overflow_policy {
                OverflowPolicy::DropOldest => {
                    self.pending.pop_front();
                    self.stats.frames_dropped += 1;
                }
                OverflowPolicy::Close => {
                    warn!(session_id = %self.id, capacity = self.config.max_pending_frames, "Pending output queue overflowed");
                    return vec![Action::Close(CloseReason::PendingOverflow)];
                }
            }
        }
        self.pending.push_back(payload);
        Vec::new()
    }

    fn on_response_done(&mut self) -> Vec<Action> {
        self.turn_chunks = 0;
        self.open_responses = self.open_responses.saturating_sub(1);

        if self.stop_received && self.open_responses == 0 {
            info!(session_id = %self.id, "Final response completed");
            return vec![Action::Close(CloseReason::CallEnded)];
        }
        Vec::new()
    }

    fn commit_turn(&mut self) -> [Action; 2] {
        self.turn_chunks = 0;
        self.open_responses += 1;
        self.stats.turns += 1;
        [
            Action::ToModel(ClientEvent::InputAudioBufferCommit),
            Action::ToModel(ClientEvent::ResponseCreate {
                response: ResponseConfig::default(),
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, prelude::BASE64_STANDARD};

    fn session_with_cadence(turn_cadence: u32) -> CallSession {
        let mut session = CallSession::new(BridgeConfig {
            turn_cadence,
            ..Default::default()
        });
        session.on_model_connected();
        session
    }

    fn media_json() -> String {
        let payload = BASE64_STANDARD.encode([0xFFu8; 160]);
        format!(r#"{{"event":"media","media":{{"payload":"{payload}"}}}}"#)
    }

    fn delta_json(samples: &[i16]) -> String {
        let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        let audio = BASE64_STANDARD.encode(bytes);
        format!(r#"{{"type":"response.audio.delta","audio":"{audio}"}}"#)
    }

    fn model_event_types(actions: &[Action]) -> Vec<&'static str> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::ToModel(event) => Some(event.event_type()),
                _ => None,
            })
            .collect()
    }

    fn telephony_payloads(actions: &[Action]) -> Vec<(String, String)> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::ToTelephony(TelephonyOutbound::Media { stream_sid, media }) => {
                    Some((stream_sid.clone(), media.payload.clone()))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_session_update_sent_once_on_connect() {
        let mut session = CallSession::new(BridgeConfig {
            voice: Some("alloy".to_string()),
            ..Default::default()
        });
        assert_eq!(session.state(), BridgeState::Connecting);

        let actions = session.on_model_connected();
        assert_eq!(actions.len(), 1);
        match &actions[0] {
            Action::ToModel(ClientEvent::SessionUpdate { session: config }) => {
                assert_eq!(config.instructions.as_deref(), Some(DEFAULT_INSTRUCTIONS));
                assert_eq!(config.voice.as_deref(), Some("alloy"));
                assert!(matches!(config.turn_detection, Some(None)));
            }
            other => panic!("Expected session.update, got {other:?}"),
        }
        assert_eq!(session.state(), BridgeState::AwaitingStart);

        assert!(session.on_model_connected().is_empty());
    }

    #[test]
    fn test_start_records_sid_and_activates() {
        let mut session = session_with_cadence(15);
        assert!(session.awaiting_start());

        let actions = session.handle_telephony_text(r#"{"event":"start","start":{"streamSid":"SID1"}}"#);
        assert!(actions.is_empty());
        assert_eq!(session.stream_sid(), Some("SID1"));
        assert_eq!(session.state(), BridgeState::Active);
        assert!(!session.awaiting_start());
    }

    #[test]
    fn test_output_before_start_is_flushed_in_order() {
        let mut session = session_with_cadence(15);

        for value in [100i16, 2000, 30000] {
            assert!(session.handle_model_text(&delta_json(&[value, value])).is_empty());
        }
        assert_eq!(session.pending_len(), 3);

        let actions = session.handle_telephony_text(r#"{"event":"start","start":{"streamSid":"SID1"}}"#);
        let frames = telephony_payloads(&actions);
        assert_eq!(frames.len(), 3);
        assert_eq!(session.pending_len(), 0);

        for ((sid, payload), value) in frames.iter().zip([100i16, 2000, 30000]) {
            assert_eq!(sid, "SID1");
            let bytes = BASE64_STANDARD.decode(payload).unwrap();
            assert_eq!(bytes, vec![crate::core::audio::mulaw::encode(value)]);
        }
        assert_eq!(session.stats().audio_out, 3);
    }

    #[test]
    fn test_output_after_start_is_sent_immediately() {
        let mut session = session_with_cadence(15);
        session.handle_telephony_text(r#"{"event":"start","start":{"streamSid":"SID1"}}"#);

        let actions = session.handle_model_text(&delta_json(&[0; 320]));
        let frames = telephony_payloads(&actions);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].0, "SID1");
        assert_eq!(BASE64_STANDARD.decode(&frames[0].1).unwrap().len(), 160);
        assert_eq!(session.pending_len(), 0);
    }

    #[test]
    fn test_turn_cadence_commits_every_n_chunks() {
        let mut session = session_with_cadence(3);

        let mut emitted = Vec::new();
        for _ in 0..2 {
            emitted.extend(model_event_types(&session.handle_telephony_text(&media_json())));
        }
        assert_eq!(emitted, vec!["input_audio_buffer.append"; 2]);
        assert_eq!(session.turn_chunks(), 2);

        let actions = session.handle_telephony_text(&media_json());
        assert_eq!(
            model_event_types(&actions),
            vec![
                "input_audio_buffer.append",
                "input_audio_buffer.commit",
                "response.create"
            ]
        );
        assert_eq!(session.turn_chunks(), 0);
        assert_eq!(session.stats().turns, 1);

        // Next turn starts from zero
        session.handle_telephony_text(&media_json());
        assert_eq!(session.turn_chunks(), 1);
    }

    #[test]
    fn test_response_create_requests_audio_and_text() {
        let mut session = session_with_cadence(1);
        let actions = session.handle_telephony_text(&media_json());
        let create = actions
            .iter()
            .find_map(|a| match a {
                Action::ToModel(ClientEvent::ResponseCreate { response }) => Some(response),
                _ => None,
            })
            .unwrap();
        assert!(create.modalities.contains(&crate::core::realtime::openai::Modality::Audio));
        assert!(create.modalities.contains(&crate::core::realtime::openai::Modality::Text));
    }

    #[test]
    fn test_response_done_resets_accumulator_silently() {
        let mut session = session_with_cadence(15);
        for _ in 0..5 {
            session.handle_telephony_text(&media_json());
        }
        assert_eq!(session.turn_chunks(), 5);

        let actions = session.handle_model_text(r#"{"type":"response.completed"}"#);
        assert!(actions.is_empty());
        assert_eq!(session.turn_chunks(), 0);
        assert_eq!(session.state(), BridgeState::AwaitingStart);
    }

    #[test]
    fn test_stop_bypasses_cadence() {
        let mut session = session_with_cadence(15);
        for _ in 0..3 {
            session.handle_telephony_text(&media_json());
        }
        assert_eq!(session.turn_chunks(), 3);

        let actions = session.handle_telephony_text(r#"{"event":"stop"}"#);
        assert_eq!(
            model_event_types(&actions),
            vec!["input_audio_buffer.commit", "response.create"]
        );
        assert_eq!(session.turn_chunks(), 0);

        // A repeated stop does not commit again
        assert!(session.handle_telephony_text(r#"{"event":"stop"}"#).is_empty());
    }

    #[test]
    fn test_stop_closes_after_final_response() {
        let mut session = session_with_cadence(2);
        session.handle_telephony_text(r#"{"event":"start","start":{"streamSid":"SID1"}}"#);
        session.handle_telephony_text(&media_json());
        session.handle_telephony_text(&media_json());
        session.handle_telephony_text(r#"{"event":"stop"}"#);

        // First completion belongs to the cadence turn
        assert!(session.handle_model_text(r#"{"type":"response.done"}"#).is_empty());

        let actions = session.handle_model_text(r#"{"type":"response.done"}"#);
        assert!(matches!(
            actions.as_slice(),
            [Action::Close(CloseReason::CallEnded)]
        ));
    }

    #[test]
    fn test_media_after_stop_is_ignored() {
        let mut session = session_with_cadence(15);
        session.handle_telephony_text(r#"{"event":"stop"}"#);
        assert!(session.handle_telephony_text(&media_json()).is_empty());
        assert_eq!(session.stats().media_in, 0);
    }

    #[test]
    fn test_malformed_messages_are_dropped() {
        let mut session = session_with_cadence(15);

        assert!(session.handle_telephony_text("not json").is_empty());
        assert!(session.handle_telephony_text(r#"{"event":"media"}"#).is_empty());
        assert!(
            session
                .handle_telephony_text(r#"{"event":"media","media":{"payload":"!!!"}}"#)
                .is_empty()
        );
        assert!(session.handle_model_text("{").is_empty());
        assert!(
            session
                .handle_model_text(r#"{"type":"response.audio.delta","audio":"AA=="}"#)
                .is_empty()
        );

        assert_eq!(session.stats().malformed, 5);
        assert_eq!(session.turn_chunks(), 0);
        assert_eq!(session.state(), BridgeState::AwaitingStart);
    }

    #[test]
    fn test_ignored_events() {
        let mut session = session_with_cadence(15);
        assert!(session.handle_telephony_text(r#"{"event":"connected","protocol":"Call"}"#).is_empty());
        assert!(session.handle_telephony_text(r#"{"event":"mark","mark":{"name":"x"}}"#).is_empty());
        assert!(session.handle_telephony_text(r#"{"event":"dtmf"}"#).is_empty());
        assert!(session.handle_model_text(r#"{"type":"session.created"}"#).is_empty());
        assert!(
            session
                .handle_model_text(r#"{"type":"error","error":{"message":"bad"}}"#)
                .is_empty()
        );
        assert_eq!(session.stats().malformed, 0);
        assert_eq!(session.state(), BridgeState::AwaitingStart);
    }

    #[test]
    fn test_overflow_drop_oldest() {
        let mut session = CallSession::new(BridgeConfig {
            max_pending_frames: 2,
            ..Default::default()
        });
        session.on_model_connected();

        for value in [1000i16, 2000, 3000] {
            assert!(session.handle_model_text(&delta_json(&[value, value])).is_empty());
        }
        assert_eq!(session.pending_len(), 2);
        assert_eq!(session.stats().frames_dropped, 1);

        let actions = session.handle_telephony_text(r#"{"event":"start","start":{"streamSid":"S"}}"#);
        let frames = telephony_payloads(&actions);
        let first = BASE64_STANDARD.decode(&frames[0].1).unwrap();
        assert_eq!(first, vec![crate::core::audio::mulaw::encode(2000)]);
    }

    #[test]
    fn test_overflow_close() {
        let mut session = CallSession::new(BridgeConfig {
            max_pending_frames: 1,
            overflow_policy: OverflowPolicy::Close,
            ..Default::default()
        });
        session.on_model_connected();

        assert!(session.handle_model_text(&delta_json(&[0, 0])).is_empty());
        let actions = session.handle_model_text(&delta_json(&[0, 0]));
        assert!(matches!(
            actions.as_slice(),
            [Action::Close(CloseReason::PendingOverflow)]
        ));
    }

    #[test]
    fn test_begin_close_is_idempotent_and_silences_events() {
        let mut session = session_with_cadence(1);
        assert!(session.begin_close(CloseReason::TelephonyClosed));
        assert!(!session.begin_close(CloseReason::ModelClosed));
        assert_eq!(session.close_reason(), Some(CloseReason::TelephonyClosed));
        assert_eq!(session.state(), BridgeState::Closing);

        assert!(session.handle_telephony_text(&media_json()).is_empty());
        assert!(session.handle_model_text(&delta_json(&[0, 0])).is_empty());
        assert!(!session.awaiting_start());

        session.finish_close();
        assert_eq!(session.state(), BridgeState::Closed);
    }

    #[test]
    fn test_cadence_zero_is_clamped() {
        let mut session = session_with_cadence(0);
        assert_eq!(session.config().turn_cadence, 1);
        let actions = session.handle_telephony_text(&media_json());
        assert_eq!(model_event_types(&actions).len(), 3);
    }

    #[test]
    fn test_end_to_end_frame_sizes() {
        let mut session = session_with_cadence(15);
        session.handle_telephony_text(r#"{"event":"start","start":{"streamSid":"SID1"}}"#);

        let actions = session.handle_telephony_text(&media_json());
        match &actions[0] {
            Action::ToModel(ClientEvent::InputAudioBufferAppend { audio }) => {
                assert_eq!(BASE64_STANDARD.decode(audio).unwrap().len(), 640);
            }
            other => panic!("Expected append, got {other:?}"),
        }

        let frames = telephony_payloads(&session.handle_model_text(&delta_json(&[0; 320])));
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].0, "SID1");
        assert_eq!(BASE64_STANDARD.decode(&frames[0].1).unwrap().len(), 160);
    }

    #[test]
    fn test_overflow_policy_from_str() {
        assert_eq!("drop_oldest".parse::<OverflowPolicy>(), Ok(OverflowPolicy::DropOldest));
        assert_eq!(" Close ".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Close));
        assert!("block".parse::<OverflowPolicy>().is_err());
        assert_eq!(OverflowPolicy::Close.as_str(), "close");
    }
}
