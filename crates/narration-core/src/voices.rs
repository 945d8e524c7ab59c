//! Voice identities, session parameters, and the voice registry.
//!
//! Platforms load their voice sets asynchronously, so the registry is
//! replaceable and publishes a change notification on every update.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::events::EventBus;

/// One voice offered by the narration engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Stable identity used in narration requests.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// BCP-47 language tag, e.g. `hi-IN`.
    pub language: String,
}

/// Voice parameters fixed for the whole of one playback session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceParams {
    /// Selected voice identity; absent means language-tag-only narration.
    pub voice_id: Option<String>,
    /// Language tag used when no voice is selected.
    pub language: Option<String>,
    /// Speech rate multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            voice_id: None,
            language: None,
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

impl VoiceParams {
    /// Parameters bound to a specific voice, at default rate and pitch.
    pub fn for_voice(voice: &Voice) -> Self {
        Self {
            voice_id: Some(voice.id.clone()),
            language: Some(voice.language.clone()),
            ..Self::default()
        }
    }

    /// Parameters narrating by language tag alone.
    pub fn for_language(tag: impl Into<String>) -> Self {
        Self {
            language: Some(tag.into()),
            ..Self::default()
        }
    }
}

/// Shared, replaceable view of the voices currently offered by the platform.
pub struct VoiceRegistry {
    voices: Mutex<Vec<Voice>>,
    events: EventBus,
}

impl VoiceRegistry {
    /// Create an empty registry publishing updates on `events`.
    pub fn new(events: EventBus) -> Self {
        Self {
            voices: Mutex::new(Vec::new()),
            events,
        }
    }

    /// Replace the voice set and notify subscribers.
    pub fn replace(&self, voices: Vec<Voice>) {
        if let Ok(mut guard) = self.voices.lock() {
            *guard = voices;
        }
        self.events.voices_changed();
    }

    /// Copy of the current voice set.
    pub fn snapshot(&self) -> Vec<Voice> {
        self.voices
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Look up a voice by identity.
    pub fn find(&self, id: &str) -> Option<Voice> {
        self.voices
            .lock()
            .ok()
            .and_then(|v| v.iter().find(|voice| voice.id == id).cloned())
    }
}

/// Pick a voice for `lang_prefix`, preferring names containing `hint`.
///
/// Falls back to any voice of that language when no name matches.
pub fn pick_voice<'a>(voices: &'a [Voice], lang_prefix: &str, hint: &str) -> Option<&'a Voice> {
    voices
        .iter()
        .find(|v| v.language.starts_with(lang_prefix) && v.name.to_lowercase().contains(hint))
        .or_else(|| voices.iter().find(|v| v.language.starts_with(lang_prefix)))
}

/// Pick a second voice for the same language, different from `first` when the
/// platform offers one, otherwise reusing `first`.
pub fn pick_alternate<'a>(
    voices: &'a [Voice],
    lang_prefix: &str,
    first: Option<&'a Voice>,
) -> Option<&'a Voice> {
    voices
        .iter()
        .find(|v| first != Some(*v) && v.language.starts_with(lang_prefix))
        .or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, name: &str, language: &str) -> Voice {
        Voice {
            id: id.to_string(),
            name: name.to_string(),
            language: language.to_string(),
        }
    }

    fn sample_voices() -> Vec<Voice> {
        vec![
            voice("en-1", "English Male", "en-US"),
            voice("en-2", "English Female", "en-GB"),
            voice("hi-1", "Hindi Female", "hi-IN"),
            voice("hi-2", "Hindi Male", "hi-IN"),
        ]
    }

    #[test]
    fn pick_voice_prefers_name_hint() {
        let voices = sample_voices();
        let picked = pick_voice(&voices, "hi", "female").unwrap();
        assert_eq!(picked.id, "hi-1");
    }

    #[test]
    fn pick_voice_falls_back_to_language_match() {
        let voices = sample_voices();
        let picked = pick_voice(&voices, "en", "robotic").unwrap();
        assert_eq!(picked.id, "en-1");
    }

    #[test]
    fn pick_alternate_differs_when_possible() {
        let voices = sample_voices();
        let first = pick_voice(&voices, "hi", "female");
        let second = pick_alternate(&voices, "hi", first).unwrap();
        assert_eq!(second.id, "hi-2");
    }

    #[test]
    fn pick_alternate_reuses_first_when_alone() {
        let voices = vec![voice("ta-1", "Tamil", "ta-IN")];
        let first = pick_voice(&voices, "ta", "female");
        let second = pick_alternate(&voices, "ta", first).unwrap();
        assert_eq!(second.id, "ta-1");
    }

    #[test]
    fn registry_replace_notifies_subscribers() {
        let events = EventBus::new();
        let mut receiver = events.subscribe();
        let registry = VoiceRegistry::new(events);

        registry.replace(sample_voices());

        assert_eq!(registry.snapshot().len(), 4);
        assert!(registry.find("hi-2").is_some());
        assert!(matches!(
            receiver.try_recv(),
            Ok(crate::events::NarrationEvent::VoicesChanged)
        ));
    }

    #[test]
    fn default_params_narrate_without_voice_identity() {
        let params = VoiceParams::default();
        assert!(params.voice_id.is_none());
        assert!(params.language.is_none());
        assert_eq!(params.rate, 1.0);
        assert_eq!(params.pitch, 1.0);
    }
}
