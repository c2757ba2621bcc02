//! Conversation session — owns the context slot and the transcript.
//!
//! A session is plain data with `&mut self` operations: callers serialize
//! submissions by construction, and independent sessions share nothing but
//! the read-only knowledge table.

use std::sync::Arc;

use chrono::Utc;
use parley_config::AppConfig;
use parley_core::error::SessionError;
use parley_core::event::{DomainEvent, EventBus};
use parley_core::message::{Exchange, Transcript, Turn};
use parley_core::Topic;
use parley_knowledge::{KnowledgeHandle, tokenize};
use uuid::Uuid;

use crate::context::ContextTracker;
use crate::matcher::Matcher;

const PREVIEW_CHARS: usize = 80;

pub struct ConversationSession {
    id: String,
    context: ContextTracker,
    matcher: Matcher,
    transcript: Transcript,
    events: Option<Arc<EventBus>>,
}

impl ConversationSession {
    pub fn new(matcher: Matcher, context: ContextTracker) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            context,
            matcher,
            transcript: Transcript::new(),
            events: None,
        }
    }

    /// Build a session from configuration around a shared knowledge handle.
    pub fn from_config(config: &AppConfig, knowledge: KnowledgeHandle) -> Self {
        let matcher = Matcher::new(knowledge).with_fallback(config.fallback_response.clone());
        Self::new(matcher, ContextTracker::from_config(&config.context))
    }

    /// Publish session events to `bus`.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    /// Process one utterance.
    ///
    /// Fails with [`SessionError::EmptyInput`] when the trimmed input is
    /// empty; in that case neither the transcript nor the context changes.
    pub fn submit(&mut self, raw: &str) -> Result<Exchange, SessionError> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let tokens = tokenize(input);
        let user = Turn::user(input);
        self.transcript.push(user.clone());
        self.publish(DomainEvent::UtteranceReceived {
            session_id: self.id.clone(),
            content_preview: input.chars().take(PREVIEW_CHARS).collect(),
            timestamp: Utc::now(),
        });

        self.context.update(input);
        let response = self.matcher.respond(input, &tokens, &self.context);
        tracing::debug!(session = %self.id, source = ?response.source, "Responding");

        let bot = Turn::bot(response.text);
        self.transcript.push(bot.clone());
        self.publish(DomainEvent::ResponseGenerated {
            session_id: self.id.clone(),
            source: response.source,
            topic: self.context.current().map(|t| t.as_str().to_string()),
            timestamp: Utc::now(),
        });

        Ok(Exchange { user, bot })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn context(&self) -> Option<&Topic> {
        self.context.current()
    }

    pub fn knowledge(&self) -> &KnowledgeHandle {
        self.matcher.knowledge()
    }

    /// Start over: empty transcript, no topic.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.context.clear();
    }

    fn publish(&self, event: DomainEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::message::Speaker;
    use parley_core::ResponseSource;
    use parley_knowledge::{Entry, KnowledgeTable};

    const FALLBACK: &str = "I'm sorry, I don't have an answer for that.";

    fn session() -> ConversationSession {
        let table = KnowledgeTable::from_entries(vec![
            Entry::new("hello", "Hi there!"),
            Entry::new("bye", "Goodbye!"),
        ]);
        ConversationSession::from_config(&AppConfig::default(), KnowledgeHandle::ready(table))
    }

    #[test]
    fn submit_appends_user_then_bot() {
        let mut session = session();
        let exchange = session.submit("  Hello  ").unwrap();

        assert_eq!(exchange.user.text, "Hello");
        assert_eq!(exchange.response(), "Hi there!");

        let turns = session.transcript().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[1].speaker, Speaker::Bot);
        assert_eq!(turns[1], exchange.bot);
    }

    #[test]
    fn empty_input_changes_nothing() {
        let mut session = session();
        session.submit("what's the weather").unwrap();

        for input in ["", "   ", "\t\n"] {
            assert_eq!(session.submit(input), Err(SessionError::EmptyInput));
        }
        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.context(), Some(&Topic::new("weather")));
    }

    #[test]
    fn unknown_input_gets_fallback() {
        let mut session = session();
        assert_eq!(session.submit("asdkjasd").unwrap().response(), FALLBACK);
    }

    #[test]
    fn context_reflects_current_utterance() {
        let mut session = session();

        // Context is updated before matching, so the trigger and the rule
        // keyword can arrive in the same utterance.
        let exchange = session.submit("weather temperature").unwrap();
        assert_eq!(
            exchange.response(),
            "I can give you the temperature. Please specify the city."
        );

        // "temperature" alone switches the topic away from weather.
        let exchange = session.submit("what's the temperature").unwrap();
        assert_eq!(exchange.response(), FALLBACK);
        assert_eq!(session.context(), Some(&Topic::new("temperature")));
    }

    #[test]
    fn hello_clears_context() {
        let mut session = session();
        session.submit("what's the weather today").unwrap();
        session.submit("hello").unwrap();
        assert!(session.context().is_none());
    }

    #[test]
    fn transcript_grows_in_order() {
        let mut session = session();
        for input in ["hello", "bye", "asdkjasd"] {
            session.submit(input).unwrap();
        }
        let texts: Vec<&str> = session
            .transcript()
            .turns()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["hello", "Hi there!", "bye", "Goodbye!", "asdkjasd", FALLBACK]
        );
    }

    #[test]
    fn reset_clears_transcript_and_context() {
        let mut session = session();
        session.submit("weather").unwrap();
        session.reset();
        assert!(session.transcript().is_empty());
        assert!(session.context().is_none());
    }

    #[test]
    fn pending_knowledge_answers_then_catches_up() {
        let handle = KnowledgeHandle::pending();
        let mut session = ConversationSession::from_config(&AppConfig::default(), handle.clone());

        assert_eq!(session.submit("hello").unwrap().response(), FALLBACK);

        handle.install(KnowledgeTable::from_entries(vec![Entry::new("hello", "Hi there!")]));
        assert_eq!(session.submit("hello").unwrap().response(), "Hi there!");
    }

    #[test]
    fn sessions_are_independent() {
        let handle = KnowledgeHandle::ready(KnowledgeTable::empty());
        let mut a = ConversationSession::from_config(&AppConfig::default(), handle.clone());
        let b = ConversationSession::from_config(&AppConfig::default(), handle);

        a.submit("weather").unwrap();
        assert_ne!(a.id(), b.id());
        assert!(b.transcript().is_empty());
        assert!(b.context().is_none());
    }

    #[tokio::test]
    async fn publishes_events() {
        let bus = Arc::new(EventBus::new(16));
        let mut rx = bus.subscribe();
        let mut session = session().with_event_bus(bus);

        session.submit("hello").unwrap();

        let first = rx.recv().await.unwrap();
        assert!(matches!(first.as_ref(), DomainEvent::UtteranceReceived { .. }));
        let second = rx.recv().await.unwrap();
        match second.as_ref() {
            DomainEvent::ResponseGenerated { source, .. } => {
                assert_eq!(*source, ResponseSource::Knowledge);
            }
            other => panic!("Expected ResponseGenerated, got {other:?}"),
        }
    }
}
