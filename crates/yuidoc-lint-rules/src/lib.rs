//! # yuidoc-lint-rules
//!
//! Built-in YuiDoc conformance rules for yuidoc-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | YD001 | `class-header-tags` | Required and rivaling tags of class headers |
//! | YD002 | `method-header-tags` | Required tags of function headers |
//! | YD003 | `block-tags` | Configured tags on every doc comment |
//! | YD004 | `block-comment-spacing` | Prose and one empty line before the tags |
//! | YD005 | `header-comment-spacing` | The same layout on class headers, as warnings |
//! | YD006 | `param-count` | One `@param` per declared parameter |
//! | YD007 | `at-least-one-module` | At least one `@module` per file |
//!
//! `YD000` (`malformed-comment`) is reported by the analyzer itself.
//!
//! ## Usage
//!
//! ```ignore
//! use yuidoc_lint_core::{Analyzer, Config};
//! use yuidoc_lint_rules::from_config;
//!
//! let config = Config::default();
//! let set = from_config(&config)?;
//! let mut builder = Analyzer::builder().root("./src").config(config);
//! for rule in set.rules {
//!     builder = builder.rule_box(rule);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod block_comment;
mod header_comments;
mod header_tags;
mod module_presence;
mod param_count;
mod presets;
mod spacing;

pub use block_comment::BlockCommentSpacing;
pub use header_comments::HeaderCommentSpacing;
pub use header_tags::HeaderTags;
pub use module_presence::AtLeastOneModule;
pub use param_count::{declared_params, ParamCount};
pub use presets::{all_rules, class_tags, default_rules, from_config, function_tags, RuleSet};
pub use spacing::{check_spacing, SpacingFinding, SpacingPolicy};

/// Re-export core types for convenience.
pub use yuidoc_lint_core::{FileRule, Rule, Severity, Violation};
