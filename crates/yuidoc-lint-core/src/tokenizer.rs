//! Host tokenizer extension point.

use crate::token::TokenStream;

/// Errors a tokenizer can report for a whole file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenizeError {
    /// Input the tokenizer cannot make sense of.
    #[error("unexpected input at line {line}, column {column}: {message}")]
    Unexpected {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed).
        column: usize,
        /// Description of the problem.
        message: String,
    },
}

/// Turns source text into a [`TokenStream`] with doc comments split into
/// sub-tokens.
///
/// Implement this to teach the analyzer a new language.
pub trait Tokenizer: Send + Sync {
    /// Language identifier (e.g., `"javascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this tokenizer handles, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Tokenizes a whole source file.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError`] when the file cannot be tokenized.
    fn tokenize(&self, source: &str) -> Result<TokenStream, TokenizeError>;
}
