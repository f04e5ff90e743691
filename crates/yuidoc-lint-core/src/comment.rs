//! Materializes doc comment blocks from the token stream.

use crate::token::{CommentIndex, TokenKind, TokenSource};

/// A line of prose inside a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProseSpan {
    /// Token position.
    pub pos: usize,
    /// Text of the line.
    pub text: String,
}

/// A tag inside a doc comment together with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    /// Token position of the tag.
    pub pos: usize,
    /// Tag name including the `@`.
    pub name: String,
    /// Text following the tag, continuation lines joined by a space.
    pub body: String,
}

/// One doc comment, split into prose, tags, and separator marks.
///
/// Prose only ever precedes the first tag; any text after a tag belongs to
/// that tag's body. Tags keep their source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    /// Position of the `/**` token.
    pub open: usize,
    /// Position of the `*/` token.
    pub closer: usize,
    /// Prose lines before the first tag.
    pub prose: Vec<ProseSpan>,
    /// Tags in source order.
    pub tags: Vec<TagSpan>,
    /// Positions of the leading `*` of each line.
    pub marks: Vec<usize>,
}

impl CommentBlock {
    /// Returns true if the block carries `name` at least once.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name == name)
    }

    /// Number of occurrences of `name`.
    #[must_use]
    pub fn tag_count(&self, name: &str) -> usize {
        self.tags.iter().filter(|t| t.name == name).count()
    }

    /// Number of separator marks strictly between two positions.
    #[must_use]
    pub fn marks_between(&self, from: usize, to: usize) -> usize {
        self.marks.iter().filter(|&&m| m > from && m < to).count()
    }
}

/// A doc comment whose closer could not be found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("doc comment opened at token {open} is never closed")]
pub struct MalformedComment {
    /// Position of the unmatched `/**`.
    pub open: usize,
}

/// Extracts the comment opened at `open`.
///
/// # Errors
///
/// Returns [`MalformedComment`] when the comment has no closer after `open`.
pub fn extract<S>(stream: &S, open: usize) -> Result<CommentBlock, MalformedComment>
where
    S: TokenSource + CommentIndex + ?Sized,
{
    let closer = stream
        .comment_closer(open)
        .filter(|&c| c > open && c < stream.len())
        .ok_or(MalformedComment { open })?;
    let tag_positions = stream.comment_tags(open);

    let mut block = CommentBlock {
        open,
        closer,
        prose: Vec::new(),
        tags: Vec::new(),
        marks: Vec::new(),
    };

    for pos in open + 1..closer {
        let Some(token) = stream.token(pos) else {
            break;
        };
        match token.kind {
            TokenKind::DocStar => block.marks.push(pos),
            TokenKind::DocTag if tag_positions.contains(&pos) => block.tags.push(TagSpan {
                pos,
                name: token.text.clone(),
                body: String::new(),
            }),
            TokenKind::DocString => match block.tags.last_mut() {
                Some(tag) => {
                    if !tag.body.is_empty() {
                        tag.body.push(' ');
                    }
                    tag.body.push_str(&token.text);
                }
                None => block.prose.push(ProseSpan {
                    pos,
                    text: token.text.clone(),
                }),
            },
            _ => {}
        }
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenStream;

    #[test]
    fn separates_prose_tags_and_marks() {
        let stream = TokenStream::builder()
            .doc_lines(&["Renders a widget.", "", "@class Widget", "@constructor"])
            .build();

        let block = extract(&stream, 0).unwrap();
        assert_eq!(block.prose.len(), 1);
        assert_eq!(block.prose[0].text, "Renders a widget.");
        let names: Vec<&str> = block.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["@class", "@constructor"]);
        assert_eq!(block.tags[0].body, "Widget");
        assert_eq!(block.marks.len(), 4);
        assert!(block.prose[0].pos < block.tags[0].pos);
        assert!(block.tags[1].pos < block.closer);
    }

    #[test]
    fn text_after_first_tag_joins_its_body() {
        let stream = TokenStream::builder()
            .doc_lines(&["Adds.", "", "@param {Number} a first", "operand", "@return sum"])
            .build();

        let block = extract(&stream, 0).unwrap();
        assert_eq!(block.prose.len(), 1);
        assert_eq!(block.tags[0].body, "{Number} a first operand");
        assert_eq!(block.tags[1].body, "sum");
    }

    #[test]
    fn missing_closer_is_malformed() {
        let stream = TokenStream::builder().doc("/**\n * Dangling.").build();
        assert_eq!(extract(&stream, 0), Err(MalformedComment { open: 0 }));
    }

    #[test]
    fn counts_marks_between_positions() {
        let stream = TokenStream::builder()
            .doc_lines(&["Foo.", "", "", "@class Foo"])
            .build();
        let block = extract(&stream, 0).unwrap();
        assert_eq!(block.marks_between(block.prose[0].pos, block.tags[0].pos), 3);
        assert_eq!(block.tag_count("@class"), 1);
        assert!(!block.has_tag("@static"));
    }
}
