//! `parley ask` — Answer a single utterance.

use std::path::PathBuf;

use parley_config::AppConfig;
use parley_core::error::SessionError;
use parley_knowledge::{CsvFileLoader, KnowledgeHandle, load_or_empty};
use parley_responder::ConversationSession;

pub async fn run(
    message: String,
    knowledge: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    match answer(&config, &message, knowledge) {
        Ok(reply) => println!("{reply}"),
        Err(e) => {
            eprintln!("  [!] {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Answer one utterance. Empty input is rejected before the knowledge
/// source is read.
fn answer(
    config: &AppConfig,
    message: &str,
    knowledge: Option<PathBuf>,
) -> Result<String, SessionError> {
    if message.trim().is_empty() {
        return Err(SessionError::EmptyInput);
    }

    let source_path = super::knowledge_source(config, knowledge);
    let table = load_or_empty(&CsvFileLoader::new(&source_path));
    let mut session = ConversationSession::from_config(config, KnowledgeHandle::ready(table));

    let exchange = session.submit(message)?;
    Ok(exchange.response().to_string())
}
