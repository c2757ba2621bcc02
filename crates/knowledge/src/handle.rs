//! Shared, write-once slot for the knowledge table.
//!
//! Sessions hold a handle instead of a table so they can accept utterances
//! while the table is still loading. Until a table is installed, every
//! lookup misses and the session answers with its fallback; nothing blocks.

use std::sync::{Arc, OnceLock};

use crate::table::{Entry, KnowledgeTable};
use crate::tokenizer::Token;

#[derive(Debug, Clone, Default)]
pub struct KnowledgeHandle {
    table: Arc<OnceLock<KnowledgeTable>>,
}

impl KnowledgeHandle {
    /// A handle with no table yet.
    pub fn pending() -> Self {
        Self::default()
    }

    /// A handle that already holds `table`.
    pub fn ready(table: KnowledgeTable) -> Self {
        let handle = Self::pending();
        handle.install(table);
        handle
    }

    /// Install the table. Returns `false` if one was already installed, in
    /// which case the existing table is kept.
    pub fn install(&self, table: KnowledgeTable) -> bool {
        let installed = self.table.set(table).is_ok();
        if !installed {
            tracing::warn!("Knowledge table already installed; ignoring the new one");
        }
        installed
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn table(&self) -> Option<&KnowledgeTable> {
        self.table.get()
    }

    /// Look up against the installed table; misses while loading.
    pub fn lookup(&self, tokens: &[Token]) -> Option<&Entry> {
        self.table.get()?.lookup(tokens)
    }
}
