//! Knowledge loaders — pluggable sources for the knowledge table.
//!
//! The matcher never touches files directly. Callers hand it a table built by
//! one of these loaders, which keeps matching tests free of I/O.

use std::path::{Path, PathBuf};

use parley_core::error::KnowledgeError;

use crate::csv::read_records;
use crate::table::{Entry, KnowledgeTable};

/// Produces a knowledge table, or fails with `KnowledgeError::SourceLoad`.
pub trait KnowledgeLoader: Send + Sync {
    /// Human-readable description of the source (used in logs and events).
    fn describe(&self) -> String;

    fn load(&self) -> Result<KnowledgeTable, KnowledgeError>;
}

/// Load a table, degrading to an empty one on failure.
///
/// A failed load is logged, never surfaced: the responder keeps working and
/// answers every utterance with the fallback.
pub fn load_or_empty(loader: &dyn KnowledgeLoader) -> KnowledgeTable {
    match loader.load() {
        Ok(table) => {
            tracing::info!(
                source = %loader.describe(),
                entries = table.len(),
                skipped = table.skipped_rows(),
                "Knowledge table loaded"
            );
            table
        }
        Err(e) => {
            tracing::warn!("{e}; continuing with an empty knowledge table");
            KnowledgeTable::empty()
        }
    }
}

/// Reads a header-less two-column CSV file.
pub struct CsvFileLoader {
    path: PathBuf,
}

impl CsvFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KnowledgeLoader for CsvFileLoader {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<KnowledgeTable, KnowledgeError> {
        let bytes = std::fs::read(&self.path).map_err(|e| KnowledgeError::SourceLoad {
            source_name: self.describe(),
            reason: e.to_string(),
        })?;

        let text = String::from_utf8(bytes).map_err(|e| KnowledgeError::SourceLoad {
            source_name: self.describe(),
            reason: format!("not valid UTF-8: {e}"),
        })?;

        Ok(KnowledgeTable::from_records(read_records(&text)))
    }
}

/// Parses CSV text already held in memory (embedded datasets, fetched bodies).
pub struct CsvTextLoader {
    name: String,
    text: String,
}

impl CsvTextLoader {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl KnowledgeLoader for CsvTextLoader {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<KnowledgeTable, KnowledgeError> {
        Ok(KnowledgeTable::from_records(read_records(&self.text)))
    }
}

/// Serves a fixed list of entries.
pub struct StaticLoader {
    entries: Vec<Entry>,
}

impl StaticLoader {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl KnowledgeLoader for StaticLoader {
    fn describe(&self) -> String {
        format!("static ({} entries)", self.entries.len())
    }

    fn load(&self) -> Result<KnowledgeTable, KnowledgeError> {
        Ok(KnowledgeTable::from_entries(self.entries.clone()))
    }
}

/// Adapts a closure into a loader.
pub struct FnLoader<F> {
    name: String,
    load: F,
}

impl<F> FnLoader<F>
where
    F: Fn() -> Result<Vec<Entry>, KnowledgeError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, load: F) -> Self {
        Self {
            name: name.into(),
            load,
        }
    }
}

impl<F> KnowledgeLoader for FnLoader<F>
where
    F: Fn() -> Result<Vec<Entry>, KnowledgeError> + Send + Sync,
{
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<KnowledgeTable, KnowledgeError> {
        (self.load)().map(KnowledgeTable::from_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = "hello,Hi there!\nbye,Goodbye!\n\"weather\",\"Sunny, 24 degrees.\"\n";

    #[test]
    fn file_loader_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::write(&path, DATASET).unwrap();

        let table = CsvFileLoader::new(&path).load().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.entries()[2].response, "Sunny, 24 degrees.");
    }

    #[test]
    fn loading_twice_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::write(&path, DATASET).unwrap();

        let loader = CsvFileLoader::new(&path);
        let first = loader.load().unwrap();
        let second = loader.load().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.entries(), second.entries());
    }

    #[test]
    fn missing_file_is_source_load_error() {
        let loader = CsvFileLoader::new("/nonexistent/dataset.csv");
        let err = loader.load().unwrap_err();
        assert!(matches!(err, KnowledgeError::SourceLoad { .. }));
    }

    #[test]
    fn invalid_utf8_is_source_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.csv");
        std::fs::write(&path, [0xff, 0xfe, b',', b'x']).unwrap();

        let err = CsvFileLoader::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn failed_load_degrades_to_empty() {
        let loader = FnLoader::new("broken", || {
            Err(KnowledgeError::SourceLoad {
                source_name: "broken".into(),
                reason: "network unreachable".into(),
            })
        });
        let table = load_or_empty(&loader);
        assert!(table.is_empty());
    }

    #[test]
    fn text_and_static_loaders_agree() {
        let from_text = CsvTextLoader::new("inline", "hello,Hi there!\nbye,Goodbye!")
            .load()
            .unwrap();
        let from_static = StaticLoader::new(vec![
            Entry::new("hello", "Hi there!"),
            Entry::new("bye", "Goodbye!"),
        ])
        .load()
        .unwrap();
        assert_eq!(from_text, from_static);
    }

    #[test]
    fn fn_loader_preserves_order() {
        let loader = FnLoader::new("closure", || {
            Ok(vec![Entry::new("b", "second"), Entry::new("a", "first")])
        });
        let table = loader.load().unwrap();
        assert_eq!(table.entries()[0].response, "second");
        assert_eq!(loader.describe(), "closure");
    }
}
