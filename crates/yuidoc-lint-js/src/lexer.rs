//! Lexer for JavaScript-like source using logos.
//!
//! Only the shape the engine needs is recognized: doc comments, brackets,
//! separators, the `function` and `class` keywords, identifiers and
//! literals. Plain comments are dropped; everything else becomes `Other`.

use logos::Logos;
use tracing::debug;
use yuidoc_lint_core::token::{split_doc_comment, Cursor};
use yuidoc_lint_core::{Token, TokenKind};

/// Input the raw lexer could not match.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A character no pattern accepts.
    #[default]
    #[error("unrecognized character")]
    Unrecognized,
}

/// Raw token from logos, before doc comments are split.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexError)]
enum RawToken {
    // === Comments ===
    #[token("/**", close_comment)]
    DocComment,
    #[token("/*", close_comment)]
    #[token("/**/")]
    BlockComment,
    #[regex(r"//[^\n]*")]
    LineComment,

    // === Trivia ===
    #[regex(r"[ \t\r\x0C]+")]
    Whitespace,
    #[token("\n")]
    Newline,

    // === Keywords ===
    #[token("function")]
    Function,
    #[token("class")]
    Class,

    // === Punctuation ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[regex(r"[=+\-*/%<>!&|^~?:.@#]")]
    Operator,
    #[regex(r"[^\x00-\x7F]")]
    NonAscii,

    // === Literals ===
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    #[regex(r"`([^`\\]|\\.)*`")]
    StringLit,
    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    Number,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,
}

/// Extends a comment opener through its `*/`, or to the end of input when
/// the comment is never closed.
fn close_comment(lex: &mut logos::Lexer<RawToken>) {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
}

impl RawToken {
    fn kind(self) -> Option<TokenKind> {
        let kind = match self {
            Self::DocComment | Self::BlockComment | Self::LineComment => return None,
            Self::Whitespace => TokenKind::Whitespace,
            Self::Newline => TokenKind::Newline,
            Self::Function => TokenKind::Function,
            Self::Class => TokenKind::Class,
            Self::LParen => TokenKind::OpenParen,
            Self::RParen => TokenKind::CloseParen,
            Self::LBrace => TokenKind::OpenBrace,
            Self::RBrace => TokenKind::CloseBrace,
            Self::LBracket => TokenKind::OpenBracket,
            Self::RBracket => TokenKind::CloseBracket,
            Self::Comma => TokenKind::Comma,
            Self::Semicolon => TokenKind::Semicolon,
            Self::Operator | Self::NonAscii => TokenKind::Other,
            Self::StringLit | Self::Number => TokenKind::Literal,
            Self::Ident => TokenKind::Identifier,
        };
        Some(kind)
    }
}

/// Lexes `source` into engine tokens.
///
/// Doc comments, terminated or not, are split into sub-tokens. Plain
/// comments produce nothing but still advance positions. Never fails.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut cursor = Cursor::default();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        match result {
            Ok(RawToken::DocComment) => {
                split_doc_comment(slice, &mut cursor, &mut out);
            }
            Ok(raw) => match raw.kind() {
                Some(kind) => cursor.emit(&mut out, kind, slice),
                None => cursor.advance(slice),
            },
            Err(err) => {
                debug!(
                    "{err} {:?} at line {}, column {}",
                    slice, cursor.line, cursor.column
                );
                cursor.emit(&mut out, TokenKind::Other, slice);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn lexes_function_declaration() {
        assert_eq!(
            kinds("function add(a, b) { return a + b; }"),
            vec![
                TokenKind::Function,
                TokenKind::Identifier,
                TokenKind::OpenParen,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::CloseParen,
                TokenKind::OpenBrace,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Other,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::CloseBrace,
            ]
        );
    }

    #[test]
    fn keywords_need_word_boundaries() {
        assert_eq!(kinds("functional classy"), vec![TokenKind::Identifier; 2]);
    }

    #[test]
    fn splits_doc_comments() {
        let tokens = lex("/**\n * Adds.\n *\n * @method add\n */");
        let doc: Vec<(TokenKind, &str)> = tokens
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| (t.kind, t.text.as_str()))
            .collect();
        assert_eq!(
            doc,
            vec![
                (TokenKind::DocOpen, "/**"),
                (TokenKind::DocStar, "*"),
                (TokenKind::DocString, "Adds."),
                (TokenKind::DocStar, "*"),
                (TokenKind::DocStar, "*"),
                (TokenKind::DocTag, "@method"),
                (TokenKind::DocString, "add"),
                (TokenKind::DocClose, "*/"),
            ]
        );
    }

    #[test]
    fn plain_comments_are_dropped_but_positions_advance() {
        let tokens = lex("/* one\n two */ // three\nfoo");
        let foo = tokens.iter().find(|t| t.text == "foo").unwrap();
        assert_eq!((foo.line, foo.column, foo.offset), (3, 1, 24));
        assert!(tokens.iter().all(|t| !t.kind.is_doc()));
    }

    #[test]
    fn empty_block_comment_is_not_a_doc_comment() {
        assert!(lex("/**/ x").iter().all(|t| !t.kind.is_doc()));
    }

    #[test]
    fn unterminated_doc_comment_has_no_closer() {
        let tokens = lex("x;\n/**\n * Never closed.\nfunction f() {}");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::DocOpen));
        assert!(tokens.iter().all(|t| t.kind != TokenKind::DocClose));
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Function));
    }

    #[test]
    fn comments_after_an_unterminated_one_are_swallowed() {
        let tokens = lex("/**\n * Doc.\n */\n/**\n * Open");
        let opens = tokens.iter().filter(|t| t.kind == TokenKind::DocOpen).count();
        let closes = tokens.iter().filter(|t| t.kind == TokenKind::DocClose).count();
        assert_eq!((opens, closes), (2, 1));
        let last = tokens.iter().rfind(|t| t.kind == TokenKind::DocString).unwrap();
        assert_eq!((last.text.as_str(), last.line), ("Open", 5));
    }

    #[test]
    fn unterminated_plain_comment_runs_to_end_of_input() {
        let tokens = lex("a;\n/* open\nfunction f() {}");
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Function));
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Newline);
    }

    #[test]
    fn doc_comment_stops_at_first_closer() {
        let tokens = lex("/** a */ x /* b */ y");
        let idents: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(idents, vec!["x", "y"]);
    }

    #[test]
    fn method_header_token_shape() {
        let shape: Vec<String> = lex("/**\n * @method run\n */\nrun: function (a) {}")
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| format!("{}:{} {:?} {:?}", t.line, t.column, t.kind, t.text))
            .collect();
        insta::assert_snapshot!(shape.join("\n"), @r#"
        1:1 DocOpen "/**"
        2:2 DocStar "*"
        2:4 DocTag "@method"
        2:12 DocString "run"
        3:2 DocClose "*/"
        4:1 Identifier "run"
        4:4 Other ":"
        4:6 Function "function"
        4:15 OpenParen "("
        4:16 Identifier "a"
        4:17 CloseParen ")"
        4:19 OpenBrace "{"
        4:20 CloseBrace "}"
        "#);
    }

    #[test]
    fn brackets_inside_strings_are_literals() {
        assert_eq!(
            kinds(r#"f("(", '{', `}`)"#),
            vec![
                TokenKind::Identifier,
                TokenKind::OpenParen,
                TokenKind::Literal,
                TokenKind::Comma,
                TokenKind::Literal,
                TokenKind::Comma,
                TokenKind::Literal,
                TokenKind::CloseParen,
            ]
        );
    }

    #[test]
    fn unknown_characters_become_other() {
        let tokens = lex("a \u{2603} \u{1} b");
        assert_eq!(tokens[2].kind, TokenKind::Other);
        assert_eq!(tokens[4].kind, TokenKind::Other);
        assert_eq!(tokens[6].column, 7);
        assert_eq!(tokens[6].offset, 8);
    }
}
