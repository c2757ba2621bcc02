//! SpeechSource trait — the abstraction over utterance producers.
//!
//! A SpeechSource turns something the user does (speaking into a microphone,
//! typing a line, a scripted replay) into final transcript strings. The core
//! treats every delivered transcript exactly like typed text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::SpeechError;

/// Default recognition language tag.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Something a speech source reports while listening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SpeechEvent {
    /// The source began listening
    Started,

    /// One final transcript for a recognized utterance
    Transcript(String),

    /// Recognition failed; no input was delivered
    Error(SpeechError),

    /// The source stopped listening (explicit stop, end of input, or after an error)
    Stopped,
}

impl SpeechEvent {
    /// The transcript text, if this event carries one.
    pub fn transcript(&self) -> Option<&str> {
        match self {
            SpeechEvent::Transcript(text) => Some(text),
            _ => None,
        }
    }
}

/// The core SpeechSource trait.
///
/// Implementations deliver one final transcript per recognized utterance
/// (no interim results) and handle engine-specific setup internally.
#[async_trait]
pub trait SpeechSource: Send + Sync {
    /// Human-readable source name (e.g., "stdin", "script").
    fn name(&self) -> &str;

    /// Recognition language tag (e.g., "en-US").
    fn language(&self) -> &str {
        DEFAULT_LANGUAGE
    }

    /// Start listening.
    ///
    /// Returns a receiver that yields events until the source stops. The
    /// last event on a cleanly closed stream is `SpeechEvent::Stopped`.
    async fn start(&self) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError>;

    /// Stop listening. Pending utterances are discarded.
    async fn stop(&self) -> Result<(), SpeechError> {
        Ok(())
    }

    /// Whether the source is currently listening.
    fn is_listening(&self) -> bool;
}
