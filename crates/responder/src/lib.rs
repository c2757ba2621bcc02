//! The responder — how an utterance becomes a reply.
//!
//! Each submission follows a fixed pipeline:
//!
//! 1. **Validate** the utterance (empty input is rejected, nothing changes)
//! 2. **Tokenize** it and record the user turn
//! 3. **Update context** from this utterance (last write wins)
//! 4. **Match**: context rule → knowledge table → fallback, first hit wins
//! 5. **Record** the bot turn and return both turns

pub mod context;
pub mod matcher;
pub mod session;

pub use context::{ContextRule, ContextTracker, TopicTrigger};
pub use matcher::{Matcher, Response};
pub use session::ConversationSession;
