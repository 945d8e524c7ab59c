//! Narration engine abstraction for dispatching utterances.
//!
//! Implementations translate one chunk at a time into platform speech calls
//! and report exactly one terminal event back per accepted submission.

use std::sync::Arc;

use crossbeam_channel::Sender;

use crate::voices::{Voice, VoiceParams, VoiceRegistry};

/// Token identifying one submitted chunk within one playback session.
///
/// The generation changes whenever a new session starts; events carrying a
/// stale generation are discarded by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkToken {
    pub generation: u64,
    pub index: usize,
}

/// Terminal outcome reported by the engine for one submitted chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    Completed,
    Failed { reason: String },
}

#[derive(Debug)]
pub enum EngineError {
    /// The engine cannot accept submissions (host loop gone, no backend).
    Unavailable,
}

/// One utterance handed to the engine: chunk text plus the session's fixed
/// voice parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationRequest {
    pub text: String,
    pub params: VoiceParams,
}

/// Host-supplied speech capability driven by the sequencer.
///
/// After a successful `submit`, the host must eventually call
/// [`crate::narrator::Narrator::on_chunk_end`] with the same token. No second
/// submission for the session arrives before that.
pub trait NarrationEngine: Send + Sync {
    /// Begin narrating one chunk.
    fn submit(&self, request: NarrationRequest, token: ChunkToken) -> Result<(), EngineError>;
    /// Best-effort immediate abort of whatever is currently being narrated.
    fn cancel_current(&self);
    /// Voices currently offered by the platform.
    fn voices(&self) -> Vec<Voice>;
}

/// Commands consumed by a host-side speech loop.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    Speak {
        request: NarrationRequest,
        token: ChunkToken,
    },
    Cancel,
}

/// Engine that ships commands over a channel to the host's speech loop.
pub struct ChannelEngine {
    cmd_tx: Sender<EngineCommand>,
    voices: Arc<VoiceRegistry>,
}

impl ChannelEngine {
    pub fn new(cmd_tx: Sender<EngineCommand>, voices: Arc<VoiceRegistry>) -> Self {
        Self { cmd_tx, voices }
    }
}

impl NarrationEngine for ChannelEngine {
    fn submit(&self, request: NarrationRequest, token: ChunkToken) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Speak { request, token })
            .map_err(|_| EngineError::Unavailable)
    }

    fn cancel_current(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel);
    }

    fn voices(&self) -> Vec<Voice> {
        self.voices.snapshot()
    }
}
