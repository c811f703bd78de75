//! Shared application state.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ServerConfig;
use crate::core::realtime::{BoxedConnector, OpenAIRealtimeConnector, RealtimeResult};

/// Error returned when a new call cannot be admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallLimitError {
    /// `max_concurrent_calls` calls are already active
    GlobalLimitReached,
}

/// Application state shared by every request handler.
pub struct AppState {
    pub config: ServerConfig,
    /// Factory for upstream model sockets, one per call
    pub connector: BoxedConnector,
    active_calls: Arc<AtomicUsize>,
}

impl AppState {
    /// Build state with the OpenAI connector described by `config`.
    pub fn new(config: ServerConfig) -> RealtimeResult<Arc<Self>> {
        let connector = OpenAIRealtimeConnector::new(config.realtime_config())?;
        Ok(Self::with_connector(config, Arc::new(connector)))
    }

    /// Build state around an existing connector.
    pub fn with_connector(config: ServerConfig, connector: BoxedConnector) -> Arc<Self> {
        Arc::new(Self {
            config,
            connector,
            active_calls: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn active_calls(&self) -> usize {
        self.active_calls.load(Ordering::Acquire)
    }

    /// Reserve a call slot. The slot is released when the permit is dropped.
    pub fn try_acquire_call(&self) -> Result<CallPermit, CallLimitError> {
        let limit = self.config.max_concurrent_calls.unwrap_or(usize::MAX);

        self.active_calls
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current < limit).then_some(current + 1)
            })
            .map_err(|_| CallLimitError::GlobalLimitReached)?;

        Ok(CallPermit {
            _inner: Arc::new(PermitInner {
                counter: Arc::clone(&self.active_calls),
            }),
        })
    }
}

/// Reservation of one call slot.
///
/// Clones share the same slot, which is freed when the last clone drops.
#[derive(Debug, Clone)]
pub struct CallPermit {
    // Held only so the slot is released when the last clone drops
    _inner: Arc<PermitInner>,
}

#[derive(Debug)]
struct PermitInner {
    counter: Arc<AtomicUsize>,
}

impl Drop for PermitInner {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::AcqRel);
    }
}
