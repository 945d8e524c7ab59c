//! In-process event bus for narration session updates.
//!
//! Provides a lightweight broadcast channel for UI subscriptions.

use tokio::sync::broadcast;

/// Notifications published by the narration core.
#[derive(Debug, Clone)]
pub enum NarrationEvent {
    /// A playback session started with this many queued chunks.
    SessionStarted { chunks: usize },
    /// The live session ended (drained, stopped, or replaced).
    SessionEnded,
    /// The narration status snapshot changed.
    StatusChanged,
    /// The available voice set changed.
    VoicesChanged,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NarrationEvent>,
}

impl EventBus {
    /// Create a new event bus with a bounded broadcast channel.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<NarrationEvent> {
        self.sender.subscribe()
    }

    /// Notify subscribers that a session started.
    pub fn session_started(&self, chunks: usize) {
        let _ = self.sender.send(NarrationEvent::SessionStarted { chunks });
    }

    /// Notify subscribers that the live session ended.
    pub fn session_ended(&self) {
        let _ = self.sender.send(NarrationEvent::SessionEnded);
    }

    /// Notify subscribers that narration status changed.
    pub fn status_changed(&self) {
        let _ = self.sender.send(NarrationEvent::StatusChanged);
    }

    /// Notify subscribers that the voice set changed.
    pub fn voices_changed(&self) {
        let _ = self.sender.send(NarrationEvent::VoicesChanged);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
