//! Rule requiring at least one `@module` tag per file.
//!
//! YuiDoc groups classes under modules; a file without any `@module` tag
//! leaves its classes orphaned in the generated docs.

use yuidoc_lint_core::{CommentBlock, FileContext, FileRule, Severity, Suggestion, Violation};

/// Rule code for at-least-one-module.
pub const CODE: &str = "YD007";

/// Rule name for at-least-one-module.
pub const NAME: &str = "at-least-one-module";

const MESSAGE: &str = "The @module tag seems to be missing. It is needed at least once.";

/// Folds over a file's blocks looking for a `@module` tag.
#[derive(Debug, Clone)]
pub struct AtLeastOneModule {
    tag: String,
}

impl Default for AtLeastOneModule {
    fn default() -> Self {
        Self::new()
    }
}

impl AtLeastOneModule {
    /// Creates the rule looking for `@module`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: "@module".to_string(),
        }
    }
}

impl FileRule for AtLeastOneModule {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires at least one @module tag in every file"
    }

    fn check_file(&self, ctx: &FileContext, blocks: &[CommentBlock]) -> Vec<Violation> {
        let modules = blocks.iter().filter(|b| b.has_tag(&self.tag)).count();
        if modules > 0 {
            return Vec::new();
        }
        vec![Violation::new(CODE, NAME, Severity::Error, ctx.location(0), MESSAGE)
            .with_suggestion(Suggestion::new("Add a @module tag to the file header"))]
    }
}
