//! Tag requirements for class headers, function headers, and plain blocks.
//!
//! # Rationale
//!
//! YuiDoc derives its API pages from header tags. A class header without
//! `@class`, or one that is both `@constructor` and `@static`, produces a
//! broken or misleading page.
//!
//! # Detected Patterns
//!
//! - A required tag is missing from the block
//! - Several tags of one rivaling group appear together
//! - No tag of a mandatory rivaling group appears
//! - The anchor tag comes after one of its rivals (warning)

use yuidoc_lint_core::{
    BlockContext, DeclarationKind, Rule, Severity, Suggestion, TagFinding, TagRule, Violation,
};

/// Rule code for class-header-tags.
pub const CLASS_CODE: &str = "YD001";
/// Rule name for class-header-tags.
pub const CLASS_NAME: &str = "class-header-tags";

/// Rule code for method-header-tags.
pub const METHOD_CODE: &str = "YD002";
/// Rule name for method-header-tags.
pub const METHOD_NAME: &str = "method-header-tags";

/// Rule code for block-tags.
pub const BLOCK_CODE: &str = "YD003";
/// Rule name for block-tags.
pub const BLOCK_NAME: &str = "block-tags";

/// Applies a [`TagRule`] to every block of one declaration kind.
///
/// [`DeclarationKind::Block`] matches every block regardless of region.
#[derive(Debug, Clone)]
pub struct HeaderTags {
    kind: DeclarationKind,
    rule: TagRule,
}

impl HeaderTags {
    /// Binds `rule` to blocks of `kind`.
    #[must_use]
    pub fn new(kind: DeclarationKind, rule: TagRule) -> Self {
        Self { kind, rule }
    }

    /// Declaration kind this checker is bound to.
    #[must_use]
    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    /// The tag rule being enforced.
    #[must_use]
    pub fn tag_rule(&self) -> &TagRule {
        &self.rule
    }

    fn applies_to(&self, ctx: &BlockContext) -> bool {
        match self.kind {
            DeclarationKind::Block => true,
            kind => ctx.region.kind() == Some(kind),
        }
    }

    fn to_violation(&self, ctx: &BlockContext, finding: &TagFinding) -> Violation {
        let violation = Violation::templated(
            self.code(),
            self.name(),
            finding.severity(),
            ctx.location(),
            finding.template(),
            finding.args(),
        );
        match finding {
            TagFinding::MissingTag { tag } => {
                violation.with_suggestion(Suggestion::new(format!("Add a {tag} tag to the comment")))
            }
            TagFinding::RivalConflict { group } => violation
                .with_suggestion(Suggestion::new(format!("Keep only one of {group}"))),
            _ => violation,
        }
    }
}

impl Rule for HeaderTags {
    fn name(&self) -> &'static str {
        match self.kind {
            DeclarationKind::Class => CLASS_NAME,
            DeclarationKind::Function => METHOD_NAME,
            DeclarationKind::Block => BLOCK_NAME,
        }
    }

    fn code(&self) -> &'static str {
        match self.kind {
            DeclarationKind::Class => CLASS_CODE,
            DeclarationKind::Function => METHOD_CODE,
            DeclarationKind::Block => BLOCK_CODE,
        }
    }

    fn description(&self) -> &'static str {
        match self.kind {
            DeclarationKind::Class => "Checks required and rivaling tags of class headers",
            DeclarationKind::Function => "Checks required tags of function and method headers",
            DeclarationKind::Block => "Checks configured tags on every doc comment",
        }
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &BlockContext) -> Vec<Violation> {
        if !self.applies_to(ctx) {
            return Vec::new();
        }
        self.rule
            .check_block(ctx.block)
            .iter()
            .map(|finding| self.to_violation(ctx, finding))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{class_tags, function_tags};
    use std::path::Path;
    use yuidoc_lint_core::{extract, FileContext, TokenKind, TokenSource, TokenStream};

    fn check(rule: &HeaderTags, stream: &TokenStream) -> Vec<Violation> {
        let file = FileContext::new(Path::new("widget.js"), stream);
        let open = stream.find_next(&[TokenKind::DocOpen], 0).unwrap();
        let block = extract(stream, open).unwrap();
        let ctx = BlockContext {
            file: &file,
            block: &block,
            region: file.classifier.classify(open),
        };
        rule.check(&ctx)
    }

    fn class_header(lines: &[&str]) -> TokenStream {
        TokenStream::builder()
            .doc_lines(lines)
            .code("\nWidget = function (config) {};")
            .build()
    }

    fn class_rule() -> HeaderTags {
        HeaderTags::new(DeclarationKind::Class, class_tags().build().unwrap())
    }

    #[test]
    fn conforming_class_header_passes() {
        let stream = class_header(&["A widget.", "", "@class Widget", "@constructor"]);
        assert!(check(&class_rule(), &stream).is_empty());
    }

    #[test]
    fn both_rivals_report_one_conflict() {
        let stream = class_header(&["A widget.", "", "@class Widget", "@constructor", "@static"]);
        let violations = check(&class_rule(), &stream);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CLASS_CODE);
        assert_eq!(
            violations[0].message,
            "Got several of the rivaling tags @constructor, @static. There should be only one."
        );
        assert_eq!(violations[0].location.line, 1);
    }

    #[test]
    fn bare_header_reports_missing_class_and_rival() {
        let stream = class_header(&["A widget."]);
        let messages: Vec<String> = check(&class_rule(), &stream)
            .into_iter()
            .map(|v| v.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Missing required tag @class.",
                "You need at least one of these tags: @constructor, @static.",
            ]
        );
    }

    #[test]
    fn class_after_rival_is_a_warning() {
        let stream = class_header(&["A widget.", "", "@static", "@class Widget"]);
        let violations = check(&class_rule(), &stream);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(
            violations[0].message,
            "The @class tag should be in front of any @static tag."
        );
    }

    #[test]
    fn class_rule_ignores_function_headers() {
        let stream = TokenStream::builder()
            .code("define(x, {\n")
            .doc_lines(&["Adds.", "", "@method add"])
            .code("\nadd: function (a) {}\n});")
            .build();
        assert!(check(&class_rule(), &stream).is_empty());
    }

    #[test]
    fn method_rule_requires_method_and_return() {
        let rule = HeaderTags::new(DeclarationKind::Function, function_tags().build().unwrap());
        let stream = TokenStream::builder()
            .code("define(x, {\n")
            .doc_lines(&["Adds.", "", "@method add", "@param {Number} a"])
            .code("\nadd: function (a) {}\n});")
            .build();
        let violations = check(&rule, &stream);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, METHOD_CODE);
        assert_eq!(violations[0].message, "Missing required tag @return.");
        assert_eq!(
            violations[0].suggestion.as_ref().map(|s| s.message.as_str()),
            Some("Add a @return tag to the comment")
        );
    }

    #[test]
    fn block_rule_applies_everywhere() {
        let tags = TagRule::builder()
            .relevant(["@since"])
            .required(["@since"])
            .build()
            .unwrap();
        let rule = HeaderTags::new(DeclarationKind::Block, tags);
        let stream = TokenStream::builder()
            .code("define(x, {\n")
            .doc_lines(&["Size."])
            .code("\nsize: 3\n});")
            .build();
        let violations = check(&rule, &stream);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, BLOCK_CODE);
    }
}
