//! Tag collection restricted to a rule's vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use crate::comment::CommentBlock;

/// Tags found in one block: counts and first positions.
///
/// Produced fresh for every block and handed to the rule engine by value,
/// so rules never carry per-block state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOccurrences {
    counts: BTreeMap<String, usize>,
    first: BTreeMap<String, usize>,
}

impl TagOccurrences {
    /// Records one occurrence of `tag` at `pos`.
    pub fn record(&mut self, tag: &str, pos: usize) {
        *self.counts.entry(tag.to_string()).or_insert(0) += 1;
        self.first.entry(tag.to_string()).or_insert(pos);
    }

    /// Number of occurrences of `tag`.
    #[must_use]
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Returns true if `tag` occurred at least once.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.count(tag) > 0
    }

    /// Position of the first occurrence of `tag`.
    #[must_use]
    pub fn first_position(&self, tag: &str) -> Option<usize> {
        self.first.get(tag).copied()
    }

    /// Distinct tags seen, in name order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Returns true when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Collects the tags of `block` that belong to `relevant`.
#[must_use]
pub fn collect(block: &CommentBlock, relevant: &BTreeSet<String>) -> TagOccurrences {
    let mut occurrences = TagOccurrences::default();
    for tag in block.tags.iter().filter(|t| relevant.contains(&t.name)) {
        occurrences.record(&tag.name, tag.pos);
    }
    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::extract;
    use crate::token::TokenStream;

    fn vocabulary(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn ignores_tags_outside_vocabulary() {
        let stream = TokenStream::builder()
            .doc_lines(&["Foo.", "", "@class Foo", "@author me", "@static"])
            .build();
        let block = extract(&stream, 0).unwrap();

        let occurrences = collect(&block, &vocabulary(&["@class", "@static", "@constructor"]));
        assert!(occurrences.contains("@class"));
        assert!(occurrences.contains("@static"));
        assert!(!occurrences.contains("@author"));
        assert_eq!(occurrences.tags().count(), 2);
    }

    #[test]
    fn keeps_counts_and_first_position() {
        let stream = TokenStream::builder()
            .doc_lines(&["Add.", "", "@param a", "@param b", "@return sum"])
            .build();
        let block = extract(&stream, 0).unwrap();

        let occurrences = collect(&block, &vocabulary(&["@param", "@return"]));
        assert_eq!(occurrences.count("@param"), 2);
        assert_eq!(occurrences.first_position("@param"), Some(block.tags[0].pos));
        assert!(occurrences.first_position("@return") > occurrences.first_position("@param"));
    }
}
