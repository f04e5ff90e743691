//! Layout checks shared by the block and header spacing rules.
//!
//! A doc comment starts with prose, then exactly one blank comment line,
//! then its tags. Blank lines are counted through the leading `*` marks:
//! the last prose line and the first tag are separated by exactly two.

use yuidoc_lint_core::{CommentBlock, Severity};

/// Severities and switches for one spacing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingPolicy {
    /// Severity when the first tag directly follows the prose.
    pub missing_blank: Severity,
    /// Severity when more than one blank line precedes the first tag.
    pub extra_blank: Severity,
    /// Report blocks whose tags are not preceded by prose.
    pub require_prose: bool,
    /// Also check the gaps between prose lines.
    pub check_prose_gaps: bool,
}

impl SpacingPolicy {
    /// Policy applied to every doc comment.
    pub const BLOCK: Self = Self {
        missing_blank: Severity::Error,
        extra_blank: Severity::Warning,
        require_prose: true,
        check_prose_gaps: true,
    };

    /// Policy applied to class headers; blank-line slips there are warnings.
    pub const HEADER: Self = Self {
        missing_blank: Severity::Warning,
        extra_blank: Severity::Warning,
        require_prose: true,
        check_prose_gaps: false,
    };
}

/// One spacing problem in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpacingFinding {
    /// No prose before the first tag or the end of the block.
    NoProse,
    /// The prose is not followed by exactly one blank line.
    TagSeparation {
        /// Marks counted between the last prose line and the first tag.
        marks: usize,
        /// Severity chosen by the policy.
        severity: Severity,
    },
    /// More than one blank line between two prose lines.
    ProseGap,
}

impl SpacingFinding {
    /// Severity of this finding.
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::NoProse => Severity::Error,
            Self::TagSeparation { severity, .. } => severity,
            Self::ProseGap => Severity::Warning,
        }
    }

    /// Message for this finding.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::NoProse => "There must be a doc comment before the first tag/end of the block.",
            Self::TagSeparation { .. } => {
                "There must be exactly one empty line between the doc comment and the first tag."
            }
            Self::ProseGap => "There shouldn't be more than 1 empty line in between comment lines.",
        }
    }
}

/// Marks expected between the last prose line and the first tag.
const EXPECTED_MARKS: usize = 2;

/// Checks the prose/tag layout of `block` under `policy`.
#[must_use]
pub fn check_spacing(block: &CommentBlock, policy: SpacingPolicy) -> Vec<SpacingFinding> {
    let mut findings = Vec::new();

    let Some(last_prose) = block.prose.last() else {
        if policy.require_prose {
            findings.push(SpacingFinding::NoProse);
        }
        return findings;
    };

    if policy.check_prose_gaps {
        for pair in block.prose.windows(2) {
            if block.marks_between(pair[0].pos, pair[1].pos) > EXPECTED_MARKS {
                findings.push(SpacingFinding::ProseGap);
            }
        }
    }

    if let Some(first_tag) = block.tags.first() {
        let marks = block.marks_between(last_prose.pos, first_tag.pos);
        if marks != EXPECTED_MARKS {
            let severity = if marks < EXPECTED_MARKS {
                policy.missing_blank
            } else {
                policy.extra_blank
            };
            findings.push(SpacingFinding::TagSeparation { marks, severity });
        }
    }

    findings
}
