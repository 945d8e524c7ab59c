//! Core narration library: sentence-aware chunking plus strictly sequential
//! playback of the resulting chunks through a host-supplied speech engine.
//!
//! The UI shell supplies document text and voice parameters; a
//! [`engine::NarrationEngine`] performs the actual synthesis and reports one
//! terminal event per submitted chunk.

pub mod chunker;
pub mod config;
pub mod dialogue;
pub mod engine;
pub mod events;
pub mod history;
pub mod narrator;
pub mod status;
pub mod voices;
