//! # yuidoc-lint-js
//!
//! JavaScript support for yuidoc-lint.
//!
//! This crate provides the [`JsTokenizer`] the analyzer uses for `.js`
//! files. It lexes with `logos` and splits every `/** ... */` comment into
//! the sub-tokens the engine expects (open, star, tag, string, close).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod lexer;
mod tokenizer;

pub use lexer::{lex, LexError};
pub use tokenizer::JsTokenizer;
