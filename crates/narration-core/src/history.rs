//! Recently narrated text history.
//!
//! Small JSON-backed store the UI shell uses to offer quick replays. Owned by
//! the shell; the sequencer itself never touches it.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Number of entries kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

/// Characters kept of each narrated text.
const PREVIEW_CHARS: usize = 100;

/// One remembered narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Leading characters of the narrated text.
    pub preview: String,
    /// Unix epoch milliseconds when the narration started.
    pub narrated_at_ms: i64,
}

/// Bounded, newest-first list of narrated texts persisted as JSON.
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
    limit: usize,
}

impl HistoryStore {
    /// Load history from `path`.
    ///
    /// A missing or unreadable file degrades to an empty history; narration
    /// must never fail because its history did.
    pub fn load(path: impl Into<PathBuf>, limit: usize) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "corrupt history file; starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Self {
            path,
            entries,
            limit: limit.max(1),
        }
    }

    /// Record a narrated text at the front, trimming to the limit.
    pub fn record(&mut self, text: &str) -> Result<()> {
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();
        self.entries.insert(
            0,
            HistoryEntry {
                preview,
                narrated_at_ms: epoch_ms(),
            },
        );
        self.entries.truncate(self.limit);
        self.save()
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Drop all entries and persist the empty list.
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.save()
    }

    fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.entries).context("serialize history")?;
        std::fs::write(&self.path, raw)
            .with_context(|| format!("write history {:?}", self.path))?;
        Ok(())
    }
}

fn epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
