//! `parley chat` — Interactive conversation over a speech source.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use parley_channels::{ScriptedSource, StdinSource};
use parley_config::AppConfig;
use parley_core::event::{DomainEvent, EventBus};
use parley_core::speech::{SpeechEvent, SpeechSource};
use parley_knowledge::{CsvFileLoader, KnowledgeHandle, KnowledgeTable, load_or_empty};
use parley_responder::ConversationSession;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

pub async fn run(
    knowledge: Option<PathBuf>,
    script: Option<PathBuf>,
    transcript_out: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let source_path = super::knowledge_source(&config, knowledge);

    // --- Knowledge Loading ---
    // Interactive sessions accept input right away; until the table lands,
    // every utterance gets the fallback. Scripted replays wait for the table
    // so their output is reproducible.
    let events = Arc::new(EventBus::default());
    let logger = spawn_event_logger(&events);
    let handle = KnowledgeHandle::pending();
    if script.is_some() {
        handle.install(load_knowledge(&source_path, &events));
    } else {
        let (path, handle, events) = (source_path.clone(), handle.clone(), Arc::clone(&events));
        tokio::task::spawn_blocking(move || handle.install(load_knowledge(&path, &events)));
    }

    let mut session =
        ConversationSession::from_config(&config, handle).with_event_bus(Arc::clone(&events));

    let interactive = script.is_none();
    let source: Box<dyn SpeechSource> = match script {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read script {}: {e}", path.display()))?;
            Box::new(ScriptedSource::from_text(&text).with_language(&config.speech.language))
        }
        None => Box::new(StdinSource::stdin().with_language(&config.speech.language)),
    };

    if interactive {
        println!();
        println!("  ╔══════════════════════════════════════════════╗");
        println!("  ║         Parley — Interactive Mode            ║");
        println!("  ╚══════════════════════════════════════════════╝");
        println!();
        println!("  Knowledge: {}", source_path.display());
        println!("  Input:     {} ({})", source.name(), source.language());
        println!();
        println!("  Type your message and press Enter.");
        println!("  Type 'exit' or Ctrl+D to quit.");
        println!();
    }

    let mut rx = source
        .start()
        .await
        .map_err(|e| format!("Speech source error: {e}"))?;

    prompt(interactive)?;

    while let Some(event) = rx.recv().await {
        match event {
            SpeechEvent::Started => {
                tracing::debug!(source = %source.name(), "Listening");
            }
            SpeechEvent::Transcript(text) => {
                if !interactive {
                    println!("  You > {text}");
                }
                match session.submit(&text) {
                    Ok(exchange) => {
                        for line in exchange.response().lines() {
                            println!("  Bot > {line}");
                        }
                        println!();
                    }
                    Err(e) => {
                        eprintln!("  [!] {e}");
                        report(&events, "session", &e);
                    }
                }
                prompt(interactive)?;
            }
            SpeechEvent::Error(e) => {
                // Nothing was heard; same as the user not submitting.
                eprintln!("  [Speech Error] {e}");
                report(&events, source.name(), &e);
                prompt(interactive)?;
            }
            SpeechEvent::Stopped => break,
        }
    }

    source.stop().await.map_err(|e| format!("Speech source error: {e}"))?;
    logger.abort();

    if let Some(path) = transcript_out {
        let json = serde_json::to_string_pretty(session.transcript())?;
        std::fs::write(&path, json)?;
        println!("  Transcript written to {}", path.display());
    }

    if interactive {
        println!();
        println!("  Goodbye!");
        println!();
    }

    Ok(())
}

fn prompt(interactive: bool) -> std::io::Result<()> {
    if interactive {
        print!("  You > ");
        std::io::stdout().flush()?;
    }
    Ok(())
}

fn report(events: &EventBus, context: &str, error: &dyn std::fmt::Display) {
    events.publish(DomainEvent::ErrorOccurred {
        context: context.to_string(),
        error_message: error.to_string(),
        timestamp: Utc::now(),
    });
}

fn load_knowledge(path: &Path, events: &EventBus) -> KnowledgeTable {
    let table = load_or_empty(&CsvFileLoader::new(path));
    events.publish(DomainEvent::KnowledgeLoaded {
        source: path.display().to_string(),
        entries: table.len(),
        skipped_rows: table.skipped_rows(),
        timestamp: Utc::now(),
    });
    table
}

fn spawn_event_logger(events: &EventBus) -> JoinHandle<()> {
    let mut rx = events.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => tracing::debug!(?event, "Domain event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Event logger lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
