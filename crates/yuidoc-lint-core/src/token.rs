//! Token model consumed by the analysis engine.
//!
//! The engine never looks at raw source text. It walks an ordered token
//! sequence whose doc comments have already been split into sub-tokens
//! (open, star, tag, string, close). Structural hints such as comment
//! closers, tag positions and bracket pairs are exposed through the
//! [`CommentIndex`] and [`ParenMatcher`] traits so that any host tokenizer,
//! or a synthetic stream built with [`TokenStream::builder`], can drive it.

use std::collections::HashMap;

/// Kind of a token in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `/**` opening a doc comment.
    DocOpen,
    /// `*/` closing a doc comment.
    DocClose,
    /// Leading `*` of a line inside a doc comment.
    DocStar,
    /// Horizontal whitespace inside a doc comment.
    DocWhitespace,
    /// Line break inside a doc comment.
    DocNewline,
    /// Free text inside a doc comment (prose or tag body).
    DocString,
    /// A tag such as `@class`.
    DocTag,
    /// Function marker keyword.
    Function,
    /// Class keyword.
    Class,
    /// Identifier.
    Identifier,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// String, template or numeric literal.
    Literal,
    /// Horizontal whitespace outside comments.
    Whitespace,
    /// Line break outside comments.
    Newline,
    /// Anything else (operators, unknown characters).
    Other,
}

impl TokenKind {
    /// Returns true for the sub-tokens of a doc comment.
    #[must_use]
    pub fn is_doc(self) -> bool {
        matches!(
            self,
            Self::DocOpen
                | Self::DocClose
                | Self::DocStar
                | Self::DocWhitespace
                | Self::DocNewline
                | Self::DocString
                | Self::DocTag
        )
    }

    /// Returns true for whitespace and line breaks, inside or outside comments.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::Newline | Self::DocWhitespace | Self::DocNewline
        )
    }

    /// Returns the closing kind for an opening bracket.
    #[must_use]
    pub fn closing(self) -> Option<Self> {
        match self {
            Self::OpenParen => Some(Self::CloseParen),
            Self::OpenBrace => Some(Self::CloseBrace),
            Self::OpenBracket => Some(Self::CloseBracket),
            _ => None,
        }
    }

    fn is_closing_bracket(self) -> bool {
        matches!(
            self,
            Self::CloseParen | Self::CloseBrace | Self::CloseBracket
        )
    }
}

/// A single token with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Literal text of the token.
    pub text: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in characters).
    pub column: usize,
    /// Byte offset from the start of the source.
    pub offset: usize,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
            offset,
        }
    }
}

/// Read access to an ordered token sequence.
pub trait TokenSource {
    /// Number of tokens.
    fn len(&self) -> usize;

    /// Token at `pos`, if any.
    fn token(&self, pos: usize) -> Option<&Token>;

    /// Returns true when the stream holds no tokens.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of the token at `pos`.
    fn kind(&self, pos: usize) -> Option<TokenKind> {
        self.token(pos).map(|t| t.kind)
    }

    /// Position of the first token at or after `from` whose kind is in `kinds`.
    fn find_next(&self, kinds: &[TokenKind], from: usize) -> Option<usize> {
        (from..self.len()).find(|&i| self.kind(i).is_some_and(|k| kinds.contains(&k)))
    }
}

/// Doc comment structure attached by the host tokenizer.
pub trait CommentIndex {
    /// Positions of all `DocOpen` tokens, in source order.
    fn comment_openers(&self) -> &[usize];

    /// Position of the `DocClose` matching the comment opened at `open`.
    fn comment_closer(&self, open: usize) -> Option<usize>;

    /// Positions of the `DocTag` tokens inside the comment opened at `open`.
    fn comment_tags(&self, open: usize) -> &[usize];
}

/// Bracket matching attached by the host tokenizer.
pub trait ParenMatcher {
    /// Position of the bracket matching the one at `pos`.
    fn matching(&self, pos: usize) -> Option<usize>;
}

#[derive(Debug, Clone, Default)]
struct CommentMeta {
    closer: Option<usize>,
    tags: Vec<usize>,
}

/// Owned token sequence with precomputed comment and bracket indexes.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    openers: Vec<usize>,
    comments: HashMap<usize, CommentMeta>,
    pairs: HashMap<usize, usize>,
}

impl TokenStream {
    /// Builds a stream and its indexes from an ordered token list.
    #[must_use]
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut openers = Vec::new();
        let mut comments: HashMap<usize, CommentMeta> = HashMap::new();
        let mut pairs = HashMap::new();
        let mut current: Option<usize> = None;
        let mut brackets: Vec<(usize, TokenKind)> = Vec::new();

        for (pos, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::DocOpen => {
                    openers.push(pos);
                    comments.insert(pos, CommentMeta::default());
                    current = Some(pos);
                }
                TokenKind::DocTag => {
                    if let Some(meta) = current.and_then(|open| comments.get_mut(&open)) {
                        meta.tags.push(pos);
                    }
                }
                TokenKind::DocClose => {
                    if let Some(meta) = current.take().and_then(|open| comments.get_mut(&open)) {
                        meta.closer = Some(pos);
                    }
                }
                kind if kind.closing().is_some() => brackets.push((pos, kind)),
                kind if kind.is_closing_bracket() => {
                    if let Some(&(open, open_kind)) = brackets.last() {
                        if open_kind.closing() == Some(kind) {
                            brackets.pop();
                            pairs.insert(open, pos);
                            pairs.insert(pos, open);
                        }
                    }
                }
                _ => {}
            }
        }

        Self {
            tokens,
            openers,
            comments,
            pairs,
        }
    }

    /// Starts a synthetic stream, mostly useful in tests.
    #[must_use]
    pub fn builder() -> TokenStreamBuilder {
        TokenStreamBuilder::new()
    }

    /// All tokens in source order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl TokenSource for TokenStream {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn token(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }
}

impl CommentIndex for TokenStream {
    fn comment_openers(&self) -> &[usize] {
        &self.openers
    }

    fn comment_closer(&self, open: usize) -> Option<usize> {
        self.comments.get(&open).and_then(|m| m.closer)
    }

    fn comment_tags(&self, open: usize) -> &[usize] {
        self.comments.get(&open).map_or(&[], |m| m.tags.as_slice())
    }
}

impl ParenMatcher for TokenStream {
    fn matching(&self, pos: usize) -> Option<usize> {
        self.pairs.get(&pos).copied()
    }
}

/// Running line/column/offset used while emitting tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset.
    pub offset: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

impl Cursor {
    /// Emits a token at the cursor and advances past its text.
    pub fn emit(&mut self, out: &mut Vec<Token>, kind: TokenKind, text: &str) {
        out.push(Token::new(kind, text, self.line, self.column, self.offset));
        self.advance(text);
    }

    /// Advances past `text` without emitting anything.
    pub fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += text.len();
    }
}

/// Splits the full text of a doc comment (`/** ... */`) into sub-tokens.
///
/// Each line yields optional leading whitespace, an optional `*` mark, and
/// then either a tag followed by its body or a run of prose. A missing `*/`
/// leaves the comment without a `DocClose` token.
pub fn split_doc_comment(text: &str, cursor: &mut Cursor, out: &mut Vec<Token>) {
    let Some(inner) = text.strip_prefix("/**") else {
        cursor.emit(out, TokenKind::Other, text);
        return;
    };
    cursor.emit(out, TokenKind::DocOpen, "/**");

    let (body, closed) = match inner.strip_suffix("*/") {
        Some(body) => (body, true),
        None => (inner, false),
    };

    let mut first = true;
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            cursor.emit(out, TokenKind::DocNewline, "\n");
        }
        split_doc_line(line, first, cursor, out);
        first = false;
    }

    if closed {
        cursor.emit(out, TokenKind::DocClose, "*/");
    }
}

fn split_doc_line(line: &str, first: bool, cursor: &mut Cursor, out: &mut Vec<Token>) {
    let mut rest = line;

    let lead = leading_ws(rest);
    if !lead.is_empty() {
        cursor.emit(out, TokenKind::DocWhitespace, lead);
        rest = &rest[lead.len()..];
    }

    if !first && rest.starts_with('*') {
        cursor.emit(out, TokenKind::DocStar, "*");
        rest = &rest[1..];
        let ws = leading_ws(rest);
        if !ws.is_empty() {
            cursor.emit(out, TokenKind::DocWhitespace, ws);
            rest = &rest[ws.len()..];
        }
    }

    if rest.starts_with('@') {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        cursor.emit(out, TokenKind::DocTag, &rest[..end]);
        rest = &rest[end..];
        let ws = leading_ws(rest);
        if !ws.is_empty() {
            cursor.emit(out, TokenKind::DocWhitespace, ws);
            rest = &rest[ws.len()..];
        }
    }

    let content = rest.trim_end();
    if !content.is_empty() {
        cursor.emit(out, TokenKind::DocString, content);
    }
    let trailing = &rest[content.len()..];
    if !trailing.is_empty() {
        cursor.emit(out, TokenKind::DocWhitespace, trailing);
    }
}

fn leading_ws(s: &str) -> &str {
    let end = s
        .find(|c: char| c != ' ' && c != '\t' && c != '\r')
        .unwrap_or(s.len());
    &s[..end]
}

/// Builds synthetic token streams from literal strings.
///
/// Doc comments are split with the same routine the real tokenizers use;
/// code is split on whitespace and punctuation with `function` and `class`
/// recognized as keywords.
#[derive(Debug, Default)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    cursor: Cursor,
}

impl TokenStreamBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a doc comment given its full text, e.g. `"/**\n * Foo.\n */"`.
    #[must_use]
    pub fn doc(mut self, text: &str) -> Self {
        split_doc_comment(text, &mut self.cursor, &mut self.tokens);
        self
    }

    /// Appends a doc comment assembled from its inner lines.
    ///
    /// `["Widget.", "", "@class Widget"]` yields the conventional
    /// `/**`, ` * Widget.`, ` *`, ` * @class Widget`, ` */` layout.
    #[must_use]
    pub fn doc_lines(self, lines: &[&str]) -> Self {
        let mut text = String::from("/**\n");
        for line in lines {
            if line.is_empty() {
                text.push_str(" *\n");
            } else {
                text.push_str(" * ");
                text.push_str(line);
                text.push('\n');
            }
        }
        text.push_str(" */");
        self.doc(&text)
    }

    /// Appends code text.
    #[must_use]
    pub fn code(mut self, text: &str) -> Self {
        let mut chars = text.char_indices().peekable();
        while let Some((start, c)) = chars.next() {
            let mut end = start + c.len_utf8();
            let kind = match c {
                '\n' => TokenKind::Newline,
                '(' => TokenKind::OpenParen,
                ')' => TokenKind::CloseParen,
                '{' => TokenKind::OpenBrace,
                '}' => TokenKind::CloseBrace,
                '[' => TokenKind::OpenBracket,
                ']' => TokenKind::CloseBracket,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                c if c.is_whitespace() => {
                    while let Some(&(i, n)) = chars.peek() {
                        if n == '\n' || !n.is_whitespace() {
                            break;
                        }
                        end = i + n.len_utf8();
                        chars.next();
                    }
                    TokenKind::Whitespace
                }
                c if c.is_alphanumeric() || c == '_' || c == '$' => {
                    while let Some(&(i, n)) = chars.peek() {
                        if !(n.is_alphanumeric() || n == '_' || n == '$') {
                            break;
                        }
                        end = i + n.len_utf8();
                        chars.next();
                    }
                    match &text[start..end] {
                        "function" => TokenKind::Function,
                        "class" => TokenKind::Class,
                        w if w.starts_with(|d: char| d.is_ascii_digit()) => TokenKind::Literal,
                        _ => TokenKind::Identifier,
                    }
                }
                _ => TokenKind::Other,
            };
            self.cursor.emit(&mut self.tokens, kind, &text[start..end]);
        }
        self
    }

    /// Appends a single token of the given kind.
    #[must_use]
    pub fn token(mut self, kind: TokenKind, text: &str) -> Self {
        self.cursor.emit(&mut self.tokens, kind, text);
        self
    }

    /// Finishes the stream.
    #[must_use]
    pub fn build(self) -> TokenStream {
        TokenStream::from_tokens(self.tokens)
    }
}
