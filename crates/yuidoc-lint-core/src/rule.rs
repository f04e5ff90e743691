//! Rule traits for defining lint rules.

use crate::comment::CommentBlock;
use crate::context::{BlockContext, FileContext};
use crate::types::{Severity, Violation};

/// A per-block lint rule.
///
/// The analyzer calls [`Rule::check`] once for every extracted doc comment,
/// possibly from several threads at once. Rules must not keep per-block
/// state; everything they need arrives in the [`BlockContext`].
///
/// # Example
///
/// ```ignore
/// use yuidoc_lint_core::{BlockContext, Rule, Severity, Violation};
///
/// pub struct NoTodoTag;
///
/// impl Rule for NoTodoTag {
///     fn name(&self) -> &'static str { "no-todo-tag" }
///     fn code(&self) -> &'static str { "YD100" }
///
///     fn check(&self, ctx: &BlockContext) -> Vec<Violation> {
///         if ctx.block.has_tag("@todo") {
///             vec![Violation::new(self.code(), self.name(), Severity::Warning,
///                 ctx.location(), "Resolve @todo before release.")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "class-header-tags").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "YD001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks a single comment block and returns any violations found.
    fn check(&self, ctx: &BlockContext) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A per-file rule that folds over all blocks of a file once.
pub trait FileRule: Send + Sync {
    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "YD007").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks the file's blocks, given in source order.
    fn check_file(&self, ctx: &FileContext, blocks: &[CommentBlock]) -> Vec<Violation>;
}

/// Type alias for boxed `FileRule` trait objects.
pub type FileRuleBox = Box<dyn FileRule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DeclarationRegion;
    use crate::comment::extract;
    use crate::token::TokenStream;
    use std::path::Path;

    struct TodoRule;

    impl Rule for TodoRule {
        fn name(&self) -> &'static str {
            "no-todo-tag"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn default_severity(&self) -> Severity {
            Severity::Warning
        }

        fn check(&self, ctx: &BlockContext) -> Vec<Violation> {
            if ctx.block.has_tag("@todo") {
                vec![Violation::new(
                    self.code(),
                    self.name(),
                    self.default_severity(),
                    ctx.location(),
                    "Resolve @todo",
                )]
            } else {
                vec![]
            }
        }
    }

    #[test]
    fn rule_sees_block_tags() {
        let stream = TokenStream::builder()
            .doc_lines(&["Draft.", "", "@todo finish"])
            .build();
        let file = FileContext::new(Path::new("a.js"), &stream);
        let block = extract(&stream, 0).unwrap();
        let ctx = BlockContext {
            file: &file,
            block: &block,
            region: DeclarationRegion::None,
        };

        let violations = TodoRule.check(&ctx);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(TodoRule.description(), "");
    }
}
