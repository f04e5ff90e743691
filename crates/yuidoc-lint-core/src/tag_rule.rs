//! Declarative tag rules and their evaluation.
//!
//! A [`TagRule`] is immutable once built. All invariants are checked at
//! construction time, so evaluation never has to deal with a rule that
//! names tags outside its own vocabulary.

use std::collections::BTreeSet;
use std::fmt;

use crate::collect::{collect, TagOccurrences};
use crate::comment::CommentBlock;
use crate::types::Severity;

/// A validated tag name (`@` followed by at least one character, no spaces).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    /// Creates a new tag name.
    ///
    /// # Errors
    ///
    /// Returns error if the name does not start with `@`, is just `@`, or
    /// contains whitespace.
    pub fn new(name: &str) -> Result<Self, RuleConfigError> {
        let valid = name.len() > 1
            && name.starts_with('@')
            && !name.chars().any(char::is_whitespace);
        if !valid {
            return Err(RuleConfigError::InvalidTagName {
                name: name.to_string(),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised while building a [`TagRule`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleConfigError {
    /// A tag name is malformed.
    #[error("invalid tag name `{name}`: expected `@` followed by a word")]
    InvalidTagName {
        /// The rejected name.
        name: String,
    },

    /// A tag is referenced but not part of the rule's relevant tags.
    #[error("{role} tag `{tag}` is not listed in the relevant tags")]
    NotRelevant {
        /// Where the tag was referenced (`required`, `rivaling`, `anchor`).
        role: &'static str,
        /// The offending tag.
        tag: String,
    },

    /// A rivaling group has no members.
    #[error("rivaling group {index} is empty")]
    EmptyRivalGroup {
        /// Index of the group.
        index: usize,
    },
}

/// A rivaling group: at most one member may appear in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RivalGroup(Vec<TagName>);

impl RivalGroup {
    /// Members in declared order.
    #[must_use]
    pub fn members(&self) -> &[TagName] {
        &self.0
    }

    /// Members joined for display, e.g. `@constructor, @static`.
    #[must_use]
    pub fn display(&self) -> String {
        join(self.0.iter().map(TagName::as_str))
    }
}

fn join<'a>(tags: impl Iterator<Item = &'a str>) -> String {
    tags.collect::<Vec<_>>().join(", ")
}

/// Required, rivaling and relevant tags for one declaration kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    required: Vec<TagName>,
    rivaling: Vec<RivalGroup>,
    relevant: BTreeSet<String>,
    rivaling_mandatory: bool,
    anchor: Option<TagName>,
}

impl TagRule {
    /// Starts building a rule.
    #[must_use]
    pub fn builder() -> TagRuleBuilder {
        TagRuleBuilder::default()
    }

    /// Tags that must appear, in declared order.
    #[must_use]
    pub fn required(&self) -> &[TagName] {
        &self.required
    }

    /// Rivaling groups, in declared order.
    #[must_use]
    pub fn rivaling(&self) -> &[RivalGroup] {
        &self.rivaling
    }

    /// The vocabulary this rule looks at.
    #[must_use]
    pub fn relevant(&self) -> &BTreeSet<String> {
        &self.relevant
    }

    /// Whether every rivaling group needs at least one member present.
    #[must_use]
    pub fn rivaling_mandatory(&self) -> bool {
        self.rivaling_mandatory
    }

    /// Tag that must precede all rival tags, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<&TagName> {
        self.anchor.as_ref()
    }

    /// Collects `block`'s tags and evaluates them.
    #[must_use]
    pub fn check_block(&self, block: &CommentBlock) -> Vec<TagFinding> {
        self.evaluate(&collect(block, &self.relevant))
    }

    /// Evaluates collected tag occurrences against this rule.
    ///
    /// Pure: the same occurrences always yield the same findings in the same
    /// order (required tags, then groups, then ordering).
    #[must_use]
    pub fn evaluate(&self, occurrences: &TagOccurrences) -> Vec<TagFinding> {
        let mut findings = Vec::new();

        for tag in &self.required {
            if !occurrences.contains(tag.as_str()) {
                findings.push(TagFinding::MissingTag { tag: tag.clone() });
            }
        }

        for group in &self.rivaling {
            let present = group
                .members()
                .iter()
                .filter(|t| occurrences.contains(t.as_str()))
                .count();
            if present > 1 {
                findings.push(TagFinding::RivalConflict {
                    group: group.display(),
                });
            } else if present == 0 && self.rivaling_mandatory {
                findings.push(TagFinding::RivalMissing {
                    group: group.display(),
                });
            }
        }

        if let Some(finding) = self.check_anchor_order(occurrences) {
            findings.push(finding);
        }

        findings
    }

    fn check_anchor_order(&self, occurrences: &TagOccurrences) -> Option<TagFinding> {
        let anchor = self.anchor.as_ref()?;
        let anchor_pos = occurrences.first_position(anchor.as_str())?;

        let rivals: Vec<&TagName> = self
            .rivaling
            .iter()
            .flat_map(|g| g.members())
            .filter(|t| *t != anchor && occurrences.contains(t.as_str()))
            .collect();
        let earliest = rivals
            .iter()
            .filter_map(|t| occurrences.first_position(t.as_str()))
            .min()?;

        (anchor_pos > earliest).then(|| TagFinding::AnchorOrder {
            anchor: anchor.clone(),
            rivals: join(rivals.iter().map(|t| t.as_str())),
        })
    }
}

/// Builder for [`TagRule`]; validation happens in [`TagRuleBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct TagRuleBuilder {
    required: Vec<String>,
    rivaling: Vec<Vec<String>>,
    relevant: Vec<String>,
    rivaling_mandatory: bool,
    anchor: Option<String>,
}

impl TagRuleBuilder {
    /// Adds required tags.
    #[must_use]
    pub fn required<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Adds a rivaling group.
    #[must_use]
    pub fn rivaling<I, S>(mut self, group: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rivaling.push(group.into_iter().map(Into::into).collect());
        self
    }

    /// Adds relevant tags.
    #[must_use]
    pub fn relevant<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relevant.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Requires at least one member of every rivaling group.
    #[must_use]
    pub fn rivaling_mandatory(mut self, mandatory: bool) -> Self {
        self.rivaling_mandatory = mandatory;
        self
    }

    /// Sets the tag that must precede rival tags.
    #[must_use]
    pub fn anchor(mut self, tag: impl Into<String>) -> Self {
        self.anchor = Some(tag.into());
        self
    }

    /// Validates and builds the rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] if a tag name is malformed, a rivaling
    /// group is empty, or a required, rivaling, or anchor tag is not in the
    /// relevant tags.
    pub fn build(self) -> Result<TagRule, RuleConfigError> {
        let relevant = self
            .relevant
            .iter()
            .map(|t| TagName::new(t).map(|n| n.0))
            .collect::<Result<BTreeSet<_>, _>>()?;

        let check = |role: &'static str, tag: &str| -> Result<TagName, RuleConfigError> {
            let name = TagName::new(tag)?;
            if relevant.contains(name.as_str()) {
                Ok(name)
            } else {
                Err(RuleConfigError::NotRelevant {
                    role,
                    tag: tag.to_string(),
                })
            }
        };

        let mut required: Vec<TagName> = Vec::new();
        for tag in &self.required {
            let name = check("required", tag)?;
            if !required.contains(&name) {
                required.push(name);
            }
        }

        let mut rivaling = Vec::with_capacity(self.rivaling.len());
        for (index, group) in self.rivaling.iter().enumerate() {
            let mut members: Vec<TagName> = Vec::new();
            for tag in group {
                let name = check("rivaling", tag)?;
                if !members.contains(&name) {
                    members.push(name);
                }
            }
            if members.is_empty() {
                return Err(RuleConfigError::EmptyRivalGroup { index });
            }
            rivaling.push(RivalGroup(members));
        }

        let anchor = self
            .anchor
            .as_deref()
            .map(|tag| check("anchor", tag))
            .transpose()?;

        Ok(TagRule {
            required,
            rivaling,
            relevant,
            rivaling_mandatory: self.rivaling_mandatory,
            anchor,
        })
    }
}

/// A single outcome of evaluating a [`TagRule`] against one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagFinding {
    /// A required tag is absent.
    MissingTag {
        /// The missing tag.
        tag: TagName,
    },
    /// More than one member of a rivaling group is present.
    RivalConflict {
        /// The group, rendered.
        group: String,
    },
    /// No member of a mandatory rivaling group is present.
    RivalMissing {
        /// The group, rendered.
        group: String,
    },
    /// The anchor tag comes after a rival tag.
    AnchorOrder {
        /// The anchor tag.
        anchor: TagName,
        /// Rival tags present, rendered.
        rivals: String,
    },
}

impl TagFinding {
    /// Severity of this finding.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::AnchorOrder { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message template with `%s` placeholders.
    #[must_use]
    pub fn template(&self) -> &'static str {
        match self {
            Self::MissingTag { .. } => "Missing required tag %s.",
            Self::RivalConflict { .. } => {
                "Got several of the rivaling tags %s. There should be only one."
            }
            Self::RivalMissing { .. } => "You need at least one of these tags: %s.",
            Self::AnchorOrder { .. } => "The %s tag should be in front of any %s tag.",
        }
    }

    /// Arguments substituted into the template.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::MissingTag { tag } => vec![tag.to_string()],
            Self::RivalConflict { group } | Self::RivalMissing { group } => vec![group.clone()],
            Self::AnchorOrder { anchor, rivals } => vec![anchor.to_string(), rivals.clone()],
        }
    }
}
