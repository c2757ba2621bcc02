//! Single-slot conversational context.
//!
//! The tracker remembers at most one topic: the one triggered by the most
//! recent utterance. Every update overwrites it, and an utterance without a
//! trigger word clears it. While a topic is active, context rules may answer
//! before the knowledge table is consulted.

use parley_config::ContextConfig;
use parley_core::Topic;
use parley_knowledge::normalize;

/// Activates `topic` when `keyword` appears anywhere in an utterance.
///
/// A keyword that is empty after normalizing never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTrigger {
    keyword: String,
    topic: Topic,
}

impl TopicTrigger {
    pub fn new(keyword: &str, topic: impl Into<Topic>) -> Self {
        Self {
            keyword: normalize(keyword),
            topic: topic.into(),
        }
    }
}

/// Answers with `response` when `topic` is active and `keyword` appears.
///
/// A keyword that is empty after normalizing never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRule {
    topic: Topic,
    keyword: String,
    response: String,
}

impl ContextRule {
    pub fn new(topic: impl Into<Topic>, keyword: &str, response: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            keyword: normalize(keyword),
            response: response.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContextTracker {
    triggers: Vec<TopicTrigger>,
    rules: Vec<ContextRule>,
    current: Option<Topic>,
}

impl ContextTracker {
    /// Triggers and rules are checked in the order given.
    pub fn new(triggers: Vec<TopicTrigger>, rules: Vec<ContextRule>) -> Self {
        Self {
            triggers,
            rules,
            current: None,
        }
    }

    pub fn from_config(config: &ContextConfig) -> Self {
        let triggers = config
            .triggers
            .iter()
            .map(|t| TopicTrigger::new(&t.keyword, t.topic.as_str()))
            .collect();
        let rules = config
            .rules
            .iter()
            .map(|r| ContextRule::new(r.topic.as_str(), &r.keyword, r.response.clone()))
            .collect();
        Self::new(triggers, rules)
    }

    /// Replace the active topic with the first trigger found in `raw`, or
    /// clear it when none is found.
    pub fn update(&mut self, raw: &str) {
        let input = normalize(raw);
        let next = self
            .triggers
            .iter()
            .find(|t| contains_keyword(&input, &t.keyword))
            .map(|t| t.topic.clone());

        if next != self.current {
            tracing::debug!(
                from = ?self.current.as_ref().map(Topic::as_str),
                to = ?next.as_ref().map(Topic::as_str),
                "Context changed"
            );
        }
        self.current = next;
    }

    pub fn current(&self) -> Option<&Topic> {
        self.current.as_ref()
    }

    /// The first rule for the active topic whose keyword appears in `raw`.
    pub fn biased_response(&self, raw: &str) -> Option<&str> {
        let topic = self.current.as_ref()?;
        let input = normalize(raw);
        self.rules
            .iter()
            .find(|r| &r.topic == topic && contains_keyword(&input, &r.keyword))
            .map(|r| r.response.as_str())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

fn contains_keyword(input: &str, keyword: &str) -> bool {
    !keyword.is_empty() && input.contains(keyword)
}

impl Default for ContextTracker {
    fn default() -> Self {
        Self::from_config(&ContextConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPERATURE_PROMPT: &str = "I can give you the temperature. Please specify the city.";

    #[test]
    fn starts_without_topic() {
        let tracker = ContextTracker::default();
        assert!(tracker.current().is_none());
        assert!(tracker.biased_response("what's the temperature").is_none());
    }

    #[test]
    fn weather_then_temperature_is_biased() {
        let mut tracker = ContextTracker::default();
        tracker.update("what's the weather today");
        assert_eq!(tracker.current(), Some(&Topic::new("weather")));
        assert_eq!(
            tracker.biased_response("what's the temperature"),
            Some(TEMPERATURE_PROMPT)
        );
    }

    #[test]
    fn utterance_without_trigger_resets() {
        let mut tracker = ContextTracker::default();
        tracker.update("what's the weather today");
        tracker.update("hello");
        assert!(tracker.current().is_none());
        assert!(tracker.biased_response("what's the temperature").is_none());
    }

    #[test]
    fn trigger_priority_follows_table_order() {
        let mut tracker = ContextTracker::default();
        tracker.update("temperature and weather");
        assert_eq!(tracker.current(), Some(&Topic::new("weather")));

        tracker.update("just the temperature");
        assert_eq!(tracker.current(), Some(&Topic::new("temperature")));
    }

    #[test]
    fn triggers_are_case_insensitive_substrings() {
        let mut tracker = ContextTracker::default();
        tracker.update("WEATHERMAN forecast");
        assert_eq!(tracker.current().map(Topic::as_str), Some("weather"));
    }

    #[test]
    fn rule_requires_matching_topic() {
        let mut tracker = ContextTracker::default();
        tracker.update("temperature please");
        assert!(tracker.biased_response("temperature please").is_none());
    }

    #[test]
    fn custom_rules_extend_the_table() {
        let mut tracker = ContextTracker::new(
            vec![TopicTrigger::new("Music", "music")],
            vec![
                ContextRule::new("music", "play", "Which song should I play?"),
                ContextRule::new("music", "play", "never reached"),
            ],
        );
        tracker.update("I love music");
        assert_eq!(
            tracker.biased_response("Play something"),
            Some("Which song should I play?")
        );
    }

    #[test]
    fn blank_keywords_never_match() {
        let mut tracker = ContextTracker::new(
            vec![TopicTrigger::new("   ", "anything"), TopicTrigger::new("music", "music")],
            vec![
                ContextRule::new("music", "", "always"),
                ContextRule::new("music", "play", "Which song should I play?"),
            ],
        );

        tracker.update("hello there");
        assert!(tracker.current().is_none());

        tracker.update("music time");
        assert_eq!(tracker.current(), Some(&Topic::new("music")));
        assert!(tracker.biased_response("music time").is_none());
        assert_eq!(
            tracker.biased_response("play music"),
            Some("Which song should I play?")
        );
    }

    #[test]
    fn clear_drops_topic() {
        let mut tracker = ContextTracker::default();
        tracker.update("weather");
        tracker.clear();
        assert!(tracker.current().is_none());
    }
}
