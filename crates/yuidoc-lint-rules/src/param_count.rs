//! Rule reconciling `@param` tags with the declared parameter list.
//!
//! # Rationale
//!
//! A function header that documents fewer or more parameters than the
//! function takes is stale. The declared count is taken from the first
//! parenthesized list after the function marker: every non-empty slot
//! between commas at nesting depth zero is one parameter, so defaults and
//! destructuring patterns count once.

use yuidoc_lint_core::{
    BlockContext, DeclarationRegion, Rule, Severity, SourceTokens, Suggestion, TokenKind,
    Violation,
};

/// Rule code for param-count.
pub const CODE: &str = "YD006";

/// Rule name for param-count.
pub const NAME: &str = "param-count";

const TEMPLATE: &str = "Parameter count mismatch: expected %s, documented %s.";

/// Compares the number of `@param` tags with the function's parameters.
#[derive(Debug, Clone)]
pub struct ParamCount {
    tag: String,
}

impl Default for ParamCount {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamCount {
    /// Creates the rule counting `@param` tags.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: "@param".to_string(),
        }
    }
}

/// Counts the parameters declared after the function marker at `marker`.
///
/// A destructured parameter such as `{ a, b }` counts once. Returns 0 when
/// no parenthesized list follows or it is never closed.
#[must_use]
pub fn declared_params(tokens: &dyn SourceTokens, marker: usize) -> usize {
    let Some(open) = tokens.find_next(&[TokenKind::OpenParen], marker) else {
        return 0;
    };
    let Some(close) = tokens.matching(open) else {
        return 0;
    };

    let mut depth = 0usize;
    let mut slots = 0;
    let mut slot_has_content = false;
    for pos in open + 1..close {
        let Some(kind) = tokens.kind(pos) else { break };
        match kind {
            TokenKind::Comma if depth == 0 => {
                if slot_has_content {
                    slots += 1;
                }
                slot_has_content = false;
                continue;
            }
            TokenKind::OpenParen | TokenKind::OpenBrace | TokenKind::OpenBracket => depth += 1,
            TokenKind::CloseParen | TokenKind::CloseBrace | TokenKind::CloseBracket => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
        if !kind.is_trivia() && !kind.is_doc() {
            slot_has_content = true;
        }
    }
    if slot_has_content {
        slots += 1;
    }
    slots
}

impl Rule for ParamCount {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires one @param tag per declared function parameter"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, ctx: &BlockContext) -> Vec<Violation> {
        let DeclarationRegion::Function { marker } = ctx.region else {
            return Vec::new();
        };

        let declared = declared_params(ctx.file.tokens, marker);
        let documented = ctx.block.tag_count(&self.tag);
        if declared == documented {
            return Vec::new();
        }

        let hint = if declared > documented {
            format!("Document the missing {}", self.tag)
        } else {
            format!("Remove the surplus {}", self.tag)
        };
        vec![Violation::templated(
            CODE,
            NAME,
            Severity::Error,
            ctx.location(),
            TEMPLATE,
            vec![declared.to_string(), documented.to_string()],
        )
        .with_suggestion(Suggestion::new(hint))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use yuidoc_lint_core::{extract, FileContext, TokenSource, TokenStream};

    fn method(params: &[&str], signature: &str) -> TokenStream {
        let mut lines = vec!["Does a thing.", "", "@method run"];
        lines.extend_from_slice(params);
        TokenStream::builder()
            .code("define(x, {\n")
            .doc_lines(&lines)
            .code(&format!("\nrun: function {signature} {{}}\n}});"))
            .build()
    }

    fn check(stream: &TokenStream) -> Vec<Violation> {
        let file = FileContext::new(Path::new("a.js"), stream);
        let open = stream.find_next(&[TokenKind::DocOpen], 0).unwrap();
        let block = extract(stream, open).unwrap();
        let ctx = BlockContext {
            file: &file,
            block: &block,
            region: file.classifier.classify(open),
        };
        ParamCount::new().check(&ctx)
    }

    #[test]
    fn missing_param_is_reported_with_counts() {
        let stream = method(&["@param a", "@param b"], "(a, b, c)");
        let violations = check(&stream);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].args, vec!["3", "2"]);
        assert_eq!(
            violations[0].message,
            "Parameter count mismatch: expected 3, documented 2."
        );
    }

    #[test]
    fn matching_count_passes() {
        let stream = method(&["@param a", "@param b", "@param c"], "(a, b, c)");
        assert!(check(&stream).is_empty());
    }

    #[test]
    fn no_params_and_no_tags_passes() {
        let stream = method(&[], "()");
        assert!(check(&stream).is_empty());
    }

    #[test]
    fn surplus_param_is_reported() {
        let stream = method(&["@param a"], "()");
        let violations = check(&stream);
        assert_eq!(violations[0].args, vec!["0", "1"]);
    }

    #[test]
    fn nested_commas_do_not_split_params() {
        let stream = method(&["@param opts", "@param cb"], "({ a, b } , cb)");
        assert!(check(&stream).is_empty());

        let marker = stream.find_next(&[TokenKind::Function], 0).unwrap();
        assert_eq!(declared_params(&stream, marker), 2);
    }

    #[test]
    fn trailing_comma_is_not_a_param() {
        let stream = TokenStream::builder().code("function f(a, b,) {}").build();
        assert_eq!(declared_params(&stream, 0), 2);
    }

    #[test]
    fn unclosed_list_counts_zero() {
        let stream = TokenStream::builder().code("function f(a, b").build();
        assert_eq!(declared_params(&stream, 0), 0);
    }

    #[test]
    fn non_function_blocks_are_skipped() {
        let stream = TokenStream::builder()
            .code("define(x, {\n")
            .doc_lines(&["Size.", "", "@param nope"])
            .code("\nsize: 3\n});")
            .build();
        assert!(check(&stream).is_empty());
    }
}
