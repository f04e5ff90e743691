//! [`Tokenizer`] implementation for JavaScript sources.

use yuidoc_lint_core::{TokenStream, TokenizeError, Tokenizer};

use crate::lexer::lex;

/// Tokenizes JavaScript and JavaScript-like files.
#[derive(Debug, Clone)]
pub struct JsTokenizer {
    extensions: &'static [&'static str],
}

const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

impl Default for JsTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsTokenizer {
    /// Creates a tokenizer for `.js`, `.mjs`, `.cjs` and `.jsx` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS,
        }
    }

    /// Restricts or widens the handled extensions (without the dot).
    #[must_use]
    pub fn with_extensions(mut self, extensions: &'static [&'static str]) -> Self {
        self.extensions = extensions;
        self
    }
}

impl Tokenizer for JsTokenizer {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    fn tokenize(&self, source: &str) -> Result<TokenStream, TokenizeError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        Ok(TokenStream::from_tokens(lex(source)))
    }
}
