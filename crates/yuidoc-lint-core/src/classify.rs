//! Declaration classification for doc comment blocks.
//!
//! A block is a class header when it sits before the first opening
//! parenthesis or brace of the file, and a function header when a function
//! marker follows it before the current member or statement ends (a comma
//! or a closing brace).

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::token::{TokenKind, TokenSource};

/// Kind of declaration a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// Class or module header.
    Class,
    /// Function or method header.
    Function,
    /// Any doc comment block.
    Block,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Function => write!(f, "function"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// The region a comment block documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationRegion {
    /// Header of the file's class; comments before `boundary` qualify.
    Class {
        /// First opening parenthesis or brace, or end of stream.
        boundary: usize,
    },
    /// Header of the function whose marker sits at `marker`.
    Function {
        /// Position of the function marker token.
        marker: usize,
    },
    /// Not a header comment.
    None,
}

impl DeclarationRegion {
    /// Declaration kind of this region, if any.
    #[must_use]
    pub fn kind(self) -> Option<DeclarationKind> {
        match self {
            Self::Class { .. } => Some(DeclarationKind::Class),
            Self::Function { .. } => Some(DeclarationKind::Function),
            Self::None => None,
        }
    }
}

const BODY_OPENERS: &[TokenKind] = &[TokenKind::OpenParen, TokenKind::OpenBrace];
const DECLARATION_ENDS: &[TokenKind] = &[TokenKind::Comma, TokenKind::CloseBrace];

/// Classifies comment positions within one token stream.
///
/// The class boundary is computed at most once; call
/// [`Classifier::class_boundary`] before fanning out across threads to
/// make sure the single initialisation happens up front.
pub struct Classifier<'a, S: TokenSource + ?Sized> {
    stream: &'a S,
    boundary: OnceCell<usize>,
}

impl<'a, S: TokenSource + ?Sized> Classifier<'a, S> {
    /// Creates a classifier over `stream`.
    #[must_use]
    pub fn new(stream: &'a S) -> Self {
        Self {
            stream,
            boundary: OnceCell::new(),
        }
    }

    /// Position of the first opening parenthesis or brace, or the stream
    /// length when there is none.
    pub fn class_boundary(&self) -> usize {
        *self.boundary.get_or_init(|| {
            self.stream
                .find_next(BODY_OPENERS, 0)
                .unwrap_or_else(|| self.stream.len())
        })
    }

    /// Function marker documented by a comment at `pos`, if any.
    #[must_use]
    pub fn function_marker(&self, pos: usize) -> Option<usize> {
        let marker = self.stream.find_next(&[TokenKind::Function], pos)?;
        match self.stream.find_next(DECLARATION_ENDS, pos) {
            Some(end) if end < marker => None,
            _ => Some(marker),
        }
    }

    /// Classifies a comment opened at `pos`. Class headers take precedence.
    #[must_use]
    pub fn classify(&self, pos: usize) -> DeclarationRegion {
        let boundary = self.class_boundary();
        if pos < boundary {
            return DeclarationRegion::Class { boundary };
        }
        match self.function_marker(pos) {
            Some(marker) => DeclarationRegion::Function { marker },
            None => DeclarationRegion::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenStream;

    #[test]
    fn header_before_first_paren_is_class() {
        let stream = TokenStream::builder()
            .doc_lines(&["Widget.", "", "@class Widget"])
            .code("\nclass Widget(a) {}")
            .build();
        let classifier = Classifier::new(&stream);
        assert!(matches!(classifier.classify(0), DeclarationRegion::Class { .. }));
    }

    #[test]
    fn comment_after_boundary_is_not_class() {
        let stream = TokenStream::builder()
            .code("define(x);\n")
            .doc_lines(&["Late.", "", "@class Late"])
            .code("\nvar y = 1;")
            .build();
        let classifier = Classifier::new(&stream);
        let open = stream.find_next(&[TokenKind::DocOpen], 0).unwrap();
        assert_eq!(classifier.classify(open), DeclarationRegion::None);
    }

    #[test]
    fn no_boundary_defaults_to_end_of_stream() {
        let stream = TokenStream::builder().doc_lines(&["Only."]).build();
        let classifier = Classifier::new(&stream);
        assert_eq!(classifier.class_boundary(), stream.len());
        assert_eq!(
            classifier.classify(0),
            DeclarationRegion::Class {
                boundary: stream.len()
            }
        );
    }

    #[test]
    fn function_before_member_end_is_function() {
        let stream = TokenStream::builder()
            .code("define(x, {\n")
            .doc_lines(&["Adds.", "", "@method add"])
            .code("\nadd: function (a, b) {}\n}")
            .build();
        let classifier = Classifier::new(&stream);
        let open = stream.find_next(&[TokenKind::DocOpen], 0).unwrap();
        let marker = stream.find_next(&[TokenKind::Function], 0).unwrap();
        assert_eq!(
            classifier.classify(open),
            DeclarationRegion::Function { marker }
        );
    }

    #[test]
    fn property_comment_is_not_function() {
        let stream = TokenStream::builder()
            .code("define(x, {\n")
            .doc_lines(&["Size.", "", "@property size"])
            .code("\nsize: 3,\nadd: function (a) {}\n}")
            .build();
        let classifier = Classifier::new(&stream);
        let open = stream.find_next(&[TokenKind::DocOpen], 0).unwrap();
        assert_eq!(classifier.classify(open), DeclarationRegion::None);
    }
}
