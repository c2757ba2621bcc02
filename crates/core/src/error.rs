//! Error types for the Parley domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; configuration errors live in
//! `parley-config`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures that block a single exchange. None of them mutate session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please enter a message!")]
    EmptyInput,
}

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("Failed to load knowledge source {source_name}: {reason}")]
    SourceLoad { source_name: String, reason: String },

    #[error("Malformed row {line}: expected 2 fields, found {fields}")]
    MalformedRow { line: usize, fields: usize },
}

/// Failures reported by a speech source.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SpeechError {
    #[error("Speech recognition is not supported: {0}")]
    Unsupported(String),

    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Recognition failed: {0}")]
    Recognition(String),

    #[error("Speech source already listening: {0}")]
    AlreadyListening(String),

    #[error("Speech source connection lost: {0}")]
    ConnectionLost(String),
}
