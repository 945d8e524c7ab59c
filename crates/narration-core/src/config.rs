//! Configuration loading and parsing.
//!
//! Defines the narration config schema and resolves defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chunker::DEFAULT_MAX_CHUNK_CHARS;
use crate::history::DEFAULT_HISTORY_LIMIT;

/// Narration tuning parameters loaded from TOML by the embedding shell.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    /// Maximum characters per chunk handed to the engine.
    pub max_chunk_chars: usize,
    /// Number of entries kept in the narration history.
    pub history_limit: usize,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl NarratorConfig {
    /// Load configuration from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        let cfg = toml::from_str::<NarratorConfig>(&raw)
            .with_context(|| format!("parse config {:?}", path))?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_limits() {
        let cfg = NarratorConfig::default();
        assert_eq!(cfg.max_chunk_chars, 2500);
        assert_eq!(cfg.history_limit, 5);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: NarratorConfig = toml::from_str("max_chunk_chars = 120").unwrap();
        assert_eq!(cfg.max_chunk_chars, 120);
        assert_eq!(cfg.history_limit, 5);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg: NarratorConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.max_chunk_chars, NarratorConfig::default().max_chunk_chars);
    }
}
