//! Knowledge side of Parley: everything between raw text and a matched entry.
//!
//! - **tokenizer** — trim, lowercase, split on whitespace
//! - **csv** — header-less, quote-aware record reader
//! - **table** — ordered (pattern, response) entries with first-match lookup
//! - **loader** — injectable sources that produce a table
//! - **handle** — shared write-once slot so sessions can start before loading ends

pub mod csv;
pub mod handle;
pub mod loader;
pub mod table;
pub mod tokenizer;

pub use handle::KnowledgeHandle;
pub use loader::{CsvFileLoader, CsvTextLoader, FnLoader, KnowledgeLoader, StaticLoader, load_or_empty};
pub use table::{Entry, KnowledgeTable};
pub use tokenizer::{Token, normalize, tokenize};
