//! # Parley Core
//!
//! Domain types, traits, and error definitions for the Parley conversational
//! responder. This crate has **no I/O** — it defines the domain model that
//! the knowledge, responder, and channel crates implement against.
//!
//! ## Design Philosophy
//!
//! Every collaborator at the edge of the system is a trait here (speech
//! input) or a plain value type (turns, topics). Implementations live in
//! their respective crates. This enables:
//! - Driving a session from typed text, a speech engine, or a script
//! - Testing the matcher without files, terminals, or microphones
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod event;
pub mod message;
pub mod speech;
pub mod topic;

// Re-export key types at crate root for ergonomics
pub use error::{KnowledgeError, SessionError, SpeechError};
pub use event::{DomainEvent, EventBus, ResponseSource};
pub use message::{Exchange, Speaker, Transcript, Turn};
pub use speech::{SpeechEvent, SpeechSource};
pub use topic::Topic;
