//! Rule-ordered response selection.

use parley_config::DEFAULT_FALLBACK_RESPONSE;
use parley_core::ResponseSource;
use parley_knowledge::{KnowledgeHandle, Token};

use crate::context::ContextTracker;

/// A selected reply and the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub source: ResponseSource,
}

/// Picks a reply: context rule, then knowledge table, then fallback.
///
/// The matcher only reads context. The session updates it from the current
/// utterance before calling [`Matcher::respond`].
#[derive(Debug, Clone)]
pub struct Matcher {
    knowledge: KnowledgeHandle,
    fallback: String,
}

impl Matcher {
    pub fn new(knowledge: KnowledgeHandle) -> Self {
        Self {
            knowledge,
            fallback: DEFAULT_FALLBACK_RESPONSE.into(),
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn knowledge(&self) -> &KnowledgeHandle {
        &self.knowledge
    }

    pub fn respond(&self, raw: &str, tokens: &[Token], context: &ContextTracker) -> Response {
        if let Some(text) = context.biased_response(raw) {
            tracing::debug!(topic = ?context.current().map(|t| t.as_str()), "Context rule matched");
            return Response {
                text: text.to_string(),
                source: ResponseSource::Context,
            };
        }

        // First match wins even when its response is blank; a blank
        // response answers with the fallback.
        match self.knowledge.lookup(tokens) {
            Some(entry) if !entry.response.trim().is_empty() => {
                tracing::debug!(pattern = %entry.pattern, "Knowledge entry matched");
                return Response {
                    text: entry.response.clone(),
                    source: ResponseSource::Knowledge,
                };
            }
            Some(entry) => {
                tracing::debug!(pattern = %entry.pattern, "Matched entry has no response");
            }
            None => {}
        }

        if !self.knowledge.is_loaded() {
            tracing::debug!("Knowledge table not loaded yet; answering with fallback");
        }

        Response {
            text: self.fallback.clone(),
            source: ResponseSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_knowledge::{CsvTextLoader, Entry, KnowledgeLoader, KnowledgeTable, tokenize};

    fn matcher() -> Matcher {
        Matcher::new(KnowledgeHandle::ready(KnowledgeTable::from_entries(vec![
            Entry::new("hello", "Hi there!"),
            Entry::new("bye", "Goodbye!"),
            Entry::new("temperature", "It is 21 degrees."),
        ])))
    }

    fn respond(matcher: &Matcher, context: &ContextTracker, raw: &str) -> Response {
        matcher.respond(raw, &tokenize(raw), context)
    }

    #[test]
    fn knowledge_match() {
        let response = respond(&matcher(), &ContextTracker::default(), "hello");
        assert_eq!(response.text, "Hi there!");
        assert_eq!(response.source, ResponseSource::Knowledge);
    }

    #[test]
    fn unknown_input_falls_back_verbatim() {
        let response = respond(&matcher(), &ContextTracker::default(), "asdkjasd");
        assert_eq!(response.text, "I'm sorry, I don't have an answer for that.");
        assert_eq!(response.source, ResponseSource::Fallback);
    }

    #[test]
    fn goodbye_is_not_bye() {
        let response = respond(&matcher(), &ContextTracker::default(), "goodbye everyone");
        assert_eq!(response.source, ResponseSource::Fallback);
    }

    #[test]
    fn context_rule_short_circuits_knowledge() {
        let mut context = ContextTracker::default();
        context.update("weather and temperature");

        let response = respond(&matcher(), &context, "weather and temperature");
        assert_eq!(response.source, ResponseSource::Context);
        assert_eq!(
            response.text,
            "I can give you the temperature. Please specify the city."
        );
    }

    #[test]
    fn without_context_the_table_answers() {
        let response = respond(&matcher(), &ContextTracker::default(), "temperature");
        assert_eq!(response.text, "It is 21 degrees.");
    }

    #[test]
    fn pending_knowledge_falls_back() {
        let matcher = Matcher::new(KnowledgeHandle::pending());
        let response = respond(&matcher, &ContextTracker::default(), "hello");
        assert_eq!(response.source, ResponseSource::Fallback);
    }

    #[test]
    fn blank_response_falls_back_without_trying_later_entries() {
        let table = CsvTextLoader::new("inline", "hello,\nhello,Hi there!\nbye,  \n")
            .load()
            .unwrap();
        let matcher = Matcher::new(KnowledgeHandle::ready(table));
        let context = ContextTracker::default();

        for input in ["hello", "bye"] {
            let response = respond(&matcher, &context, input);
            assert_eq!(response.text, "I'm sorry, I don't have an answer for that.");
            assert_eq!(response.source, ResponseSource::Fallback);
        }
    }

    #[test]
    fn custom_fallback() {
        let matcher = matcher().with_fallback("No idea.");
        let response = respond(&matcher, &ContextTracker::default(), "zzz");
        assert_eq!(response.text, "No idea.");
    }
}
