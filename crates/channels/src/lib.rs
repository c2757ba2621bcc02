//! Utterance sources for Parley.
//!
//! Each source implements `SpeechSource` and delivers final transcripts to
//! whoever drives a conversation session. The session never knows whether a
//! transcript was spoken, typed, or replayed.
//!
//! Available sources:
//! - **Line** — one utterance per line from stdin or any async reader
//! - **Scripted** — fixed replay of transcripts and recognition errors

pub mod line;
pub mod scripted;

pub use line::{LineSource, StdinSource};
pub use scripted::ScriptedSource;
