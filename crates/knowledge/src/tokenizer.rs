//! Text normalization.
//!
//! A token is a lowercase, whitespace-delimited word. No stemming, no
//! punctuation stripping: `"hello!"` and `"hello"` are different tokens.

/// A normalized word.
pub type Token = String;

/// Trim, lowercase, and split on runs of whitespace.
///
/// Empty or whitespace-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Trim and lowercase the whole text. Used for substring checks.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
