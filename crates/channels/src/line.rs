//! Line source — typed input treated as recognized speech.
//!
//! The simplest source: every non-empty line is one final transcript.
//! Used for `parley chat` on a terminal, and for piping text in.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parley_core::error::SpeechError;
use parley_core::speech::{DEFAULT_LANGUAGE, SpeechEvent, SpeechSource};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

/// Lines that end the session instead of being submitted.
const EXIT_WORDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Reads utterances line by line from any async reader.
pub struct LineSource<R> {
    name: String,
    language: String,
    reader: Mutex<Option<R>>,
    listening: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

/// Line source bound to the process's standard input.
pub type StdinSource = LineSource<BufReader<Stdin>>;

impl StdinSource {
    pub fn stdin() -> Self {
        Self::new("stdin", BufReader::new(io::stdin()))
    }
}

impl<R> LineSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            language: DEFAULT_LANGUAGE.into(),
            reader: Mutex::new(Some(reader)),
            listening: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

#[async_trait]
impl<R> SpeechSource for LineSource<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn language(&self) -> &str {
        &self.language
    }

    async fn start(&self) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError> {
        let reader = self
            .reader
            .lock()
            .await
            .take()
            .ok_or_else(|| SpeechError::AlreadyListening(self.name.clone()))?;

        let (tx, rx) = mpsc::channel(32);
        let listening = Arc::clone(&self.listening);
        listening.store(true, Ordering::SeqCst);

        let handle = tokio::spawn(async move {
            let _ = tx.send(SpeechEvent::Started).await;
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }

                        if EXIT_WORDS.contains(&line) {
                            break;
                        }

                        if tx.send(SpeechEvent::Transcript(line.to_string())).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx
                            .send(SpeechEvent::Error(SpeechError::ConnectionLost(e.to_string())))
                            .await;
                        break;
                    }
                }
            }

            listening.store(false, Ordering::SeqCst);
            let _ = tx.send(SpeechEvent::Stopped).await;
        });

        *self.task.lock().await = Some(handle);
        Ok(rx)
    }

    async fn stop(&self) -> Result<(), SpeechError> {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
            tracing::debug!(source = %self.name, "Line source stopped");
        }
        self.listening.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }
}
