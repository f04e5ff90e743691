//! Context types for rule execution.

use std::path::Path;

use crate::classify::{Classifier, DeclarationRegion};
use crate::comment::CommentBlock;
use crate::token::{CommentIndex, ParenMatcher, TokenSource};
use crate::types::Location;

/// Everything the engine needs from a tokenized file.
pub trait SourceTokens: TokenSource + CommentIndex + ParenMatcher + Sync {}

impl<T: TokenSource + CommentIndex + ParenMatcher + Sync> SourceTokens for T {}

/// Context provided to rules for one file.
pub struct FileContext<'a> {
    /// Path relative to the project root, used in reported locations.
    pub path: &'a Path,
    /// The file's tokens.
    pub tokens: &'a dyn SourceTokens,
    /// Declaration classifier for this file.
    pub classifier: Classifier<'a, dyn SourceTokens + 'a>,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, tokens: &'a dyn SourceTokens) -> Self {
        Self {
            path,
            tokens,
            classifier: Classifier::new(tokens),
        }
    }

    /// Location of the token at `pos`, or line 1 column 1 when out of range.
    #[must_use]
    pub fn location(&self, pos: usize) -> Location {
        self.tokens.token(pos).map_or_else(
            || Location::new(self.path.to_path_buf(), 1, 1),
            |t| Location::from_token(self.path.to_path_buf(), t),
        )
    }
}

/// Context provided to rules for one comment block.
pub struct BlockContext<'a> {
    /// The enclosing file.
    pub file: &'a FileContext<'a>,
    /// The block under analysis.
    pub block: &'a CommentBlock,
    /// The region the block was classified into.
    pub region: DeclarationRegion,
}

impl BlockContext<'_> {
    /// Location of the block's opening token; all block findings use it.
    #[must_use]
    pub fn location(&self) -> Location {
        self.file.location(self.block.open)
    }
}
