//! Sequential playback of chunked narration.
//!
//! Owns the live chunk queue and drives the narration engine one utterance
//! at a time, advancing only when the current chunk's terminal event lands.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::chunker;
use crate::config::NarratorConfig;
use crate::dialogue::{CharacterCast, DialogueLine, script_requests};
use crate::engine::{ChunkOutcome, ChunkToken, NarrationEngine, NarrationRequest};
use crate::events::EventBus;
use crate::status::StatusStore;
use crate::voices::VoiceParams;

struct Session {
    generation: u64,
    queue: VecDeque<NarrationRequest>,
    next_index: usize,
    live: bool,
}

/// Coordinates one playback session at a time against the narration engine.
///
/// The queue and the generation counter live behind a single lock; nothing
/// outside this type mutates them. Starting a new session bumps the
/// generation, so terminal events from an abandoned session cannot touch the
/// fresh queue.
#[derive(Clone)]
pub struct Narrator {
    engine: Arc<dyn NarrationEngine>,
    session: Arc<Mutex<Session>>,
    status: StatusStore,
    events: EventBus,
    config: NarratorConfig,
}

impl Narrator {
    /// Create a narrator publishing session notifications on `events`.
    pub fn new(engine: Arc<dyn NarrationEngine>, events: EventBus, config: NarratorConfig) -> Self {
        Self {
            engine,
            session: Arc::new(Mutex::new(Session {
                generation: 0,
                queue: VecDeque::new(),
                next_index: 0,
                live: false,
            })),
            status: StatusStore::new(events.clone()),
            events,
            config,
        }
    }

    /// Access the shared status store.
    pub fn status(&self) -> &StatusStore {
        &self.status
    }

    /// Access the event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Start narrating `text` with fixed `params`, replacing any live session.
    ///
    /// Text that chunks to nothing (empty or whitespace-only) is a no-op
    /// completion: the previous session still ends, no chunk is submitted.
    pub fn play(&self, text: &str, params: &VoiceParams) {
        let requests = chunker::split(text, self.config.max_chunk_chars)
            .into_iter()
            .map(|text| NarrationRequest {
                text,
                params: params.clone(),
            })
            .collect();
        self.start_session(requests);
    }

    /// Play a multi-character script as one ordered session.
    pub fn play_dialogue(&self, lines: &[DialogueLine], cast: &CharacterCast) {
        self.start_session(script_requests(lines, cast, self.config.max_chunk_chars));
    }

    /// Narrate a pre-built request sequence.
    pub fn play_requests(&self, requests: Vec<NarrationRequest>) {
        self.start_session(requests);
    }

    /// Stop the live session immediately.
    ///
    /// The queue is invalidated before the engine is told to cancel, so a
    /// terminal event already in flight is discarded as stale.
    pub fn stop(&self) {
        let was_live = {
            let mut s = self.session.lock().unwrap();
            s.generation += 1;
            s.queue.clear();
            let was = s.live;
            s.live = false;
            was
        };
        self.engine.cancel_current();
        if was_live {
            tracing::info!("narration stopped");
            self.status.on_idle();
            self.events.session_ended();
        }
    }

    /// Deliver the terminal event for a previously submitted chunk.
    ///
    /// Completed and failed both advance the queue; a failed chunk is skipped
    /// rather than aborting the remaining chunks. Tokens from an invalidated
    /// session are dropped.
    pub fn on_chunk_end(&self, token: ChunkToken, outcome: ChunkOutcome) {
        {
            let s = self.session.lock().unwrap();
            if token.generation != s.generation {
                tracing::debug!(
                    generation = token.generation,
                    index = token.index,
                    "discarding stale terminal event"
                );
                return;
            }
        }

        match &outcome {
            ChunkOutcome::Completed => self.status.on_chunk_end(false),
            ChunkOutcome::Failed { reason } => {
                tracing::warn!(
                    index = token.index,
                    reason = %reason,
                    "chunk narration failed; continuing with next chunk"
                );
                self.status.on_chunk_end(true);
            }
        }

        self.dispatch_next(token.generation);
    }

    fn start_session(&self, requests: Vec<NarrationRequest>) {
        let (generation, was_live, total) = {
            let mut s = self.session.lock().unwrap();
            s.generation += 1;
            s.queue = requests.into();
            s.next_index = 0;
            let was = s.live;
            let total = s.queue.len();
            s.live = total > 0;
            (s.generation, was, total)
        };

        self.engine.cancel_current();
        if was_live {
            self.events.session_ended();
        }

        if total == 0 {
            tracing::debug!("narration input produced no chunks");
            if was_live {
                self.status.on_idle();
            }
            return;
        }

        tracing::info!(chunks = total, "narration session started");
        self.status.on_session_start(total);
        self.events.session_started(total);
        self.dispatch_next(generation);
    }

    /// Submit the next queued chunk for `generation`, skipping chunks the
    /// engine rejects. Ends the session when the queue is drained.
    fn dispatch_next(&self, generation: u64) {
        loop {
            let next = {
                let mut s = self.session.lock().unwrap();
                if s.generation != generation {
                    return;
                }
                match s.queue.pop_front() {
                    Some(request) => {
                        let token = ChunkToken {
                            generation,
                            index: s.next_index,
                        };
                        s.next_index += 1;
                        Some((request, token))
                    }
                    None => {
                        s.live = false;
                        None
                    }
                }
            };

            let Some((request, token)) = next else {
                tracing::info!("narration session drained");
                self.status.on_idle();
                self.events.session_ended();
                return;
            };

            match self.engine.submit(request, token) {
                Ok(()) => return,
                Err(err) => {
                    tracing::warn!(
                        index = token.index,
                        error = ?err,
                        "engine rejected chunk; skipping"
                    );
                    self.status.on_chunk_end(true);
                }
            }
        }
    }
}
