//! Scripted source — replays a fixed sequence of recognition results.
//!
//! Stands in for a real speech engine in tests and demos: each step is
//! either a recognized transcript or a recognition error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parley_core::error::SpeechError;
use parley_core::speech::{DEFAULT_LANGUAGE, SpeechEvent, SpeechSource};
use tokio::sync::mpsc;

pub struct ScriptedSource {
    language: String,
    steps: Vec<Result<String, SpeechError>>,
    listening: Arc<AtomicBool>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Result<String, SpeechError>>) -> Self {
        Self {
            language: DEFAULT_LANGUAGE.into(),
            steps,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// One transcript per non-empty line of `text`.
    pub fn from_text(text: &str) -> Self {
        let steps = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Ok(line.to_string()))
            .collect();
        Self::new(steps)
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[async_trait]
impl SpeechSource for ScriptedSource {
    fn name(&self) -> &str {
        "script"
    }

    fn language(&self) -> &str {
        &self.language
    }

    async fn start(&self) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError> {
        if self.listening.swap(true, Ordering::SeqCst) {
            return Err(SpeechError::AlreadyListening(self.name().to_string()));
        }

        // Room for every event, so replay never waits on the consumer.
        let (tx, rx) = mpsc::channel(self.steps.len() + 2);
        let listening = Arc::clone(&self.listening);
        let steps = self.steps.clone();

        tokio::spawn(async move {
            let _ = tx.send(SpeechEvent::Started).await;
            for step in steps {
                if !listening.load(Ordering::SeqCst) {
                    break;
                }
                let event = match step {
                    Ok(text) => SpeechEvent::Transcript(text),
                    Err(e) => SpeechEvent::Error(e),
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            listening.store(false, Ordering::SeqCst);
            let _ = tx.send(SpeechEvent::Stopped).await;
        });

        Ok(rx)
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        self.listening.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }
}
