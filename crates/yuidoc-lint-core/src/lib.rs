//! # yuidoc-lint-core
//!
//! Core engine for checking YuiDoc-style doc comments against tag rules.
//!
//! This crate knows nothing about a particular source language. A host
//! [`Tokenizer`] turns a file into a [`TokenStream`] in which every doc
//! comment is split into sub-tokens; the engine then:
//!
//! - extracts each comment into a [`CommentBlock`] (prose and tags)
//! - classifies it with a [`Classifier`] as a class header, a function
//!   header, or neither
//! - runs every enabled [`Rule`] on each block and every [`FileRule`]
//!   once per file
//!
//! Declarative tag requirements live in [`TagRule`]; rule crates wrap them.
//!
//! ## Example
//!
//! ```ignore
//! use yuidoc_lint_core::{Analyzer, Severity};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .tokenizer(JsTokenizer::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for v in &result.violations {
//!     println!("{v}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod classify;
mod collect;
mod comment;
mod config;
mod context;
mod rule;
mod sink;
mod tag_rule;
mod tokenizer;
mod types;

/// Token model shared by tokenizers and the engine.
pub mod token;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError, MALFORMED_CODE, MALFORMED_NAME};
pub use classify::{Classifier, DeclarationKind, DeclarationRegion};
pub use collect::{collect, TagOccurrences};
pub use comment::{extract, CommentBlock, MalformedComment, ProseSpan, TagSpan};
pub use config::{
    AnalyzerConfig, ChecksConfig, Config, ConfigError, RuleConfig, TagRuleConfig, TagsConfig,
};
pub use context::{BlockContext, FileContext, SourceTokens};
pub use rule::{FileRule, FileRuleBox, Rule, RuleBox};
pub use sink::DiagnosticSink;
pub use tag_rule::{RivalGroup, RuleConfigError, TagFinding, TagName, TagRule, TagRuleBuilder};
pub use token::{CommentIndex, ParenMatcher, Token, TokenKind, TokenSource, TokenStream};
pub use tokenizer::{TokenizeError, Tokenizer};
pub use types::{
    render_template, sort_violations, FileFailure, LintResult, Location, Severity, Suggestion,
    Violation, ViolationDiagnostic,
};
