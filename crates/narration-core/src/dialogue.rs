//! Multi-character dialogue playback.
//!
//! Maps scripted speaker names to voice parameters and flattens the script
//! into the same ordered request sequence used for long-text narration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::chunker;
use crate::engine::NarrationRequest;
use crate::voices::VoiceParams;

/// One scripted line spoken by a named character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// Speaker-to-voice assignment for a script.
///
/// Unknown speakers fall back to the cast's default parameters.
#[derive(Debug, Clone, Default)]
pub struct CharacterCast {
    assignments: HashMap<String, VoiceParams>,
    fallback: VoiceParams,
}

impl CharacterCast {
    /// Create a cast whose unassigned speakers use `fallback`.
    pub fn new(fallback: VoiceParams) -> Self {
        Self {
            assignments: HashMap::new(),
            fallback,
        }
    }

    /// Assign a voice to a speaker name.
    pub fn assign(&mut self, speaker: impl Into<String>, params: VoiceParams) {
        self.assignments.insert(speaker.into(), params);
    }

    /// Parameters for `speaker`, falling back when unassigned.
    pub fn params_for(&self, speaker: &str) -> &VoiceParams {
        self.assignments.get(speaker).unwrap_or(&self.fallback)
    }
}

/// Build the ordered request sequence for a script.
///
/// Lines longer than `max_chunk_chars` are chunked like any other document;
/// every resulting chunk keeps its speaker's voice parameters. Line order is
/// preserved exactly.
pub fn script_requests(
    lines: &[DialogueLine],
    cast: &CharacterCast,
    max_chunk_chars: usize,
) -> Vec<NarrationRequest> {
    let mut requests = Vec::new();
    for line in lines {
        let params = cast.params_for(&line.speaker);
        for text in chunker::split(&line.text, max_chunk_chars) {
            requests.push(NarrationRequest {
                text,
                params: params.clone(),
            });
        }
    }
    requests
}
