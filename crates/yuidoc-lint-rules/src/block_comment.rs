//! Rule requiring prose and one blank line before the tags of every block.
//!
//! # Detected Patterns
//!
//! - A block that starts with a tag, or holds nothing at all (error)
//! - Tags directly under the prose (error)
//! - Several blank lines before the tags (warning)
//! - Several blank lines between prose lines (warning)
//!
//! # Good Patterns
//!
//! ```text
//! /**
//!  * Resizes the widget.
//!  *
//!  * @method resize
//!  */
//! ```

use yuidoc_lint_core::{BlockContext, Rule, Severity, Violation};

use crate::spacing::{check_spacing, SpacingPolicy};

/// Rule code for block-comment-spacing.
pub const CODE: &str = "YD004";

/// Rule name for block-comment-spacing.
pub const NAME: &str = "block-comment-spacing";

/// Checks prose/tag layout on every doc comment.
#[derive(Debug, Clone)]
pub struct BlockCommentSpacing {
    policy: SpacingPolicy,
}

impl Default for BlockCommentSpacing {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCommentSpacing {
    /// Creates the rule with the block policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            policy: SpacingPolicy::BLOCK,
        }
    }
}

impl Rule for BlockCommentSpacing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires prose and exactly one empty line before the tags of every doc comment"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &BlockContext) -> Vec<Violation> {
        check_spacing(ctx.block, self.policy)
            .into_iter()
            .map(|finding| {
                Violation::new(
                    CODE,
                    NAME,
                    finding.severity(),
                    ctx.location(),
                    finding.message(),
                )
            })
            .collect()
    }
}
