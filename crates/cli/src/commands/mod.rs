pub mod ask;
pub mod chat;
pub mod config_cmd;
pub mod doctor;
pub mod onboard;

use std::path::PathBuf;

use parley_config::AppConfig;

/// The knowledge source to use: the command-line override, else the config.
pub fn knowledge_source(config: &AppConfig, cli_override: Option<PathBuf>) -> PathBuf {
    cli_override.unwrap_or_else(|| config.knowledge.source.clone())
}
