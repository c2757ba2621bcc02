//! Configuration loading, validation, and management for Parley.
//!
//! Loads configuration from `~/.parley/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use parley_core::Topic;
use parley_core::speech::DEFAULT_LANGUAGE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Returned when neither a context rule nor the knowledge table answers.
pub const DEFAULT_FALLBACK_RESPONSE: &str = "I'm sorry, I don't have an answer for that.";

/// The root configuration structure.
///
/// Maps directly to `~/.parley/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Response used when nothing matches
    #[serde(default = "default_fallback_response")]
    pub fallback_response: String,

    /// Knowledge source configuration
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Speech input configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Context triggers and biasing rules
    #[serde(default)]
    pub context: ContextConfig,
}

fn default_fallback_response() -> String {
    DEFAULT_FALLBACK_RESPONSE.into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Path to the header-less two-column CSV knowledge source.
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_knowledge_source")]
    pub source: PathBuf,
}

fn default_knowledge_source() -> PathBuf {
    PathBuf::from("dataset.csv")
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            source: default_knowledge_source(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Recognition language tag
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.into()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// The data that drives the context tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Keyword → topic triggers, in priority order
    #[serde(default = "default_triggers")]
    pub triggers: Vec<TriggerConfig>,

    /// (topic, keyword) → canned response rules, in priority order
    #[serde(default = "default_rules")]
    pub rules: Vec<ContextRuleConfig>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            triggers: default_triggers(),
            rules: default_rules(),
        }
    }
}

/// Sets the active topic when `keyword` appears in an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub keyword: String,
    pub topic: String,
}

/// Answers with `response` when `topic` is active and `keyword` appears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRuleConfig {
    pub topic: String,
    pub keyword: String,
    pub response: String,
}

fn default_triggers() -> Vec<TriggerConfig> {
    vec![
        TriggerConfig {
            keyword: "weather".into(),
            topic: "weather".into(),
        },
        TriggerConfig {
            keyword: "temperature".into(),
            topic: "temperature".into(),
        },
    ]
}

fn default_rules() -> Vec<ContextRuleConfig> {
    vec![ContextRuleConfig {
        topic: "weather".into(),
        keyword: "temperature".into(),
        response: "I can give you the temperature. Please specify the city.".into(),
    }]
}

impl AppConfig {
    /// Load configuration from the default path (~/.parley/config.toml).
    ///
    /// Environment overrides (highest priority):
    /// - `PARLEY_KNOWLEDGE` — knowledge source path
    /// - `PARLEY_FALLBACK` — fallback response
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_path(), |key| std::env::var(key).ok())
    }

    /// Load from `path`, then apply overrides looked up through `env`.
    /// A missing file yields defaults, which are still overridden.
    pub fn load_with_env(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;

        if let Some(source) = env("PARLEY_KNOWLEDGE") {
            config.knowledge.source = PathBuf::from(source);
        }

        if let Some(fallback) = env("PARLEY_FALLBACK") {
            config.fallback_response = fallback;
            config.validate()?;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".parley")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_response.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "fallback_response must not be empty".into(),
            ));
        }

        if self.speech.language.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "speech.language must not be empty".into(),
            ));
        }

        for (i, trigger) in self.context.triggers.iter().enumerate() {
            if trigger.keyword.trim().is_empty() || trigger.topic.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "context.triggers[{i}] needs a keyword and a topic"
                )));
            }
        }

        for (i, rule) in self.context.rules.iter().enumerate() {
            if rule.topic.trim().is_empty()
                || rule.keyword.trim().is_empty()
                || rule.response.trim().is_empty()
            {
                return Err(ConfigError::ValidationError(format!(
                    "context.rules[{i}] needs a topic, a keyword and a response"
                )));
            }
        }

        Ok(())
    }

    /// Rules whose topic no trigger can ever activate. Not an error, but
    /// such a rule never fires.
    pub fn unreachable_rules(&self) -> Vec<&ContextRuleConfig> {
        self.context
            .rules
            .iter()
            .filter(|rule| {
                let topic = Topic::new(&rule.topic);
                !self
                    .context
                    .triggers
                    .iter()
                    .any(|t| Topic::new(&t.topic) == topic)
            })
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fallback_response: default_fallback_response(),
            knowledge: KnowledgeConfig::default(),
            speech: SpeechConfig::default(),
            context: ContextConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
