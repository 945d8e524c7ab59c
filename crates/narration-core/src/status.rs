//! Shared narration status store and update helpers.
//!
//! Centralizes the counters the UI reads for progress and control state.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::events::EventBus;

/// Snapshot of the current narration session used by the UI shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NarrationStatus {
    /// True while a session is live (between begin and end notifications).
    pub speaking: bool,
    /// Chunks queued when the session started.
    pub chunks_total: usize,
    /// Chunks that reached a completed terminal event.
    pub chunks_spoken: usize,
    /// Chunks that reached a failed terminal event (or were rejected).
    pub chunks_failed: usize,
}

impl NarrationStatus {
    /// Percentage of chunks that reached a terminal event.
    pub fn percent_done(&self) -> u8 {
        if self.chunks_total == 0 {
            return 0;
        }
        let done = self.chunks_spoken + self.chunks_failed;
        ((done * 100) / self.chunks_total).min(100) as u8
    }
}

#[derive(Clone)]
pub struct StatusStore {
    inner: Arc<Mutex<NarrationStatus>>,
    events: EventBus,
}

impl StatusStore {
    /// Create a status store publishing changes on `events`.
    pub fn new(events: EventBus) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NarrationStatus::default())),
            events,
        }
    }

    /// Best-effort copy of the current status.
    pub fn snapshot(&self) -> NarrationStatus {
        self.inner
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Reset counters for a fresh session of `chunks_total` chunks.
    pub fn on_session_start(&self, chunks_total: usize) {
        if let Ok(mut s) = self.inner.lock() {
            s.speaking = true;
            s.chunks_total = chunks_total;
            s.chunks_spoken = 0;
            s.chunks_failed = 0;
        }
        self.events.status_changed();
    }

    /// Record one terminal event.
    pub fn on_chunk_end(&self, failed: bool) {
        if let Ok(mut s) = self.inner.lock() {
            if failed {
                s.chunks_failed += 1;
            } else {
                s.chunks_spoken += 1;
            }
        }
        self.events.status_changed();
    }

    /// Mark the session over.
    pub fn on_idle(&self) {
        if let Ok(mut s) = self.inner.lock() {
            s.speaking = false;
        }
        self.events.status_changed();
    }
}
