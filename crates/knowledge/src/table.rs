//! The knowledge table: ordered (pattern, response) entries.
//!
//! Matching is **token overlap, first match wins**: an entry matches when any
//! user token equals any token of its pattern, and the earliest matching
//! entry in table order is returned. There is no scoring, so
//! `"goodbye everyone"` does not match a `"bye"` pattern.

use std::collections::HashSet;

use parley_core::error::KnowledgeError;
use serde::{Deserialize, Serialize};

use crate::csv::Record;
use crate::tokenizer::{Token, tokenize};

/// A single (pattern, response) pair. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub pattern: String,
    pub response: String,
}

impl Entry {
    pub fn new(pattern: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            response: response.into(),
        }
    }
}

/// Ordered, read-only collection of entries with pre-tokenized patterns.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeTable {
    entries: Vec<Entry>,
    pattern_tokens: Vec<HashSet<Token>>,
    skipped_rows: usize,
}

impl KnowledgeTable {
    /// An empty table. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from entries, keeping their order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let pattern_tokens = entries
            .iter()
            .map(|e| tokenize(&e.pattern).into_iter().collect())
            .collect();
        Self {
            entries,
            pattern_tokens,
            skipped_rows: 0,
        }
    }

    /// Build a table from parsed CSV records.
    ///
    /// Column 0 is the pattern, column 1 the response, further columns are
    /// ignored. Rows with fewer than two fields are skipped and counted.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut entries = Vec::with_capacity(records.len());
        let mut skipped_rows = 0;

        for record in records {
            let field_count = record.fields.len();
            let mut fields = record.fields.into_iter();
            match (fields.next(), fields.next()) {
                (Some(pattern), Some(response)) => entries.push(Entry { pattern, response }),
                _ => {
                    let warning = KnowledgeError::MalformedRow {
                        line: record.line,
                        fields: field_count,
                    };
                    tracing::warn!("Skipping knowledge row: {warning}");
                    skipped_rows += 1;
                }
            }
        }

        let mut table = Self::from_entries(entries);
        table.skipped_rows = skipped_rows;
        table
    }

    /// Find the first entry sharing at least one token with the input.
    pub fn lookup(&self, tokens: &[Token]) -> Option<&Entry> {
        if tokens.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .zip(&self.pattern_tokens)
            .find(|(_, pattern)| tokens.iter().any(|t| pattern.contains(t)))
            .map(|(entry, _)| entry)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows dropped while loading because they had fewer than two fields.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }
}

impl PartialEq for KnowledgeTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}
