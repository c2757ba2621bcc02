//! Conversational topic — the value held in the single context slot.

use serde::{Deserialize, Serialize};

/// An active conversational topic such as `weather` or `temperature`.
///
/// The set is open: topics come from the configured trigger table, so this
/// is a normalized name rather than a closed enum. "No topic" is expressed
/// as `Option::<Topic>::None` by the holder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
    /// Create a topic; the name is trimmed and lowercased.
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Topic {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.0
    }
}

impl From<&str> for Topic {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_normalized() {
        assert_eq!(Topic::new("  Weather "), Topic::from("weather"));
        assert_eq!(Topic::new("Weather").as_str(), "weather");
    }

    #[test]
    fn deserialized_topic_is_normalized() {
        let topic: Topic = serde_json::from_str(r#"" Weather ""#).unwrap();
        assert_eq!(topic, Topic::new("weather"));
        assert_eq!(serde_json::to_string(&topic).unwrap(), r#""weather""#);
    }
}
