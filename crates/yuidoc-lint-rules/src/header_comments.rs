//! Rule checking the blank line between prose and tags of class headers.
//!
//! Class headers get a lenient variant of the block layout check: a missing
//! or doubled blank line is only a warning. A header whose tags come before
//! any prose is still an error.

use yuidoc_lint_core::{BlockContext, DeclarationKind, Rule, Severity, Violation};

use crate::spacing::{check_spacing, SpacingPolicy};

/// Rule code for header-comment-spacing.
pub const CODE: &str = "YD005";

/// Rule name for header-comment-spacing.
pub const NAME: &str = "header-comment-spacing";

/// Checks prose/tag layout on class headers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderCommentSpacing;

impl HeaderCommentSpacing {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for HeaderCommentSpacing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Warns when a class header lacks exactly one empty line before its tags"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, ctx: &BlockContext) -> Vec<Violation> {
        if ctx.region.kind() != Some(DeclarationKind::Class) {
            return Vec::new();
        }
        check_spacing(ctx.block, SpacingPolicy::HEADER)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use yuidoc_lint_core::{extract, FileContext, TokenStream};

    fn check(stream: &TokenStream) -> Vec<Violation> {
        let file = FileContext::new(Path::new("widget.js"), stream);
        let block = extract(stream, 0).unwrap();
        let ctx = BlockContext {
            file: &file,
            block: &block,
            region: file.classifier.classify(0),
        };
        HeaderCommentSpacing.check(&ctx)
    }

    #[test]
    fn cramped_header_is_a_warning() {
        let stream = TokenStream::builder()
            .doc("/** Widget.\n * @class Widget\n */")
            .code("\nclass Widget(a) {}")
            .build();
        let violations = check(&stream);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].code, CODE);
    }

    #[test]
    fn header_without_prose_is_an_error() {
        let stream = TokenStream::builder()
            .doc("/**\n * @class Widget\n * @constructor\n */")
            .code("\nclass Widget(a) {}")
            .build();
        let violations = check(&stream);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Error);
        assert_eq!(
            violations[0].message,
            "There must be a doc comment before the first tag/end of the block."
        );
    }

    #[test]
    fn ignores_blocks_outside_the_header() {
        let stream = TokenStream::builder()
            .doc("/** Helper.\n * @method help\n */")
            .build();
        let file = FileContext::new(Path::new("a.js"), &stream);
        let block = extract(&stream, 0).unwrap();
        let ctx = BlockContext {
            file: &file,
            block: &block,
            region: yuidoc_lint_core::DeclarationRegion::None,
        };
        assert!(HeaderCommentSpacing.check(&ctx).is_empty());
    }
}
