//! Heading levels, candidates, and the consensus outline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level, ordered from most to least important.
///
/// `H1 < H2 < H3 < H4 < Body`, so the more important of two levels is the
/// smaller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading
    H3,
    /// Fourth-level heading
    H4,
    /// Not a heading
    Body,
}

impl HeadingLevel {
    /// Check if this is any heading level (H1-H4).
    pub fn is_heading(self) -> bool {
        self != HeadingLevel::Body
    }

    /// Check if this level appears in the published outline (H1-H3).
    pub fn is_outline_level(self) -> bool {
        matches!(self, HeadingLevel::H1 | HeadingLevel::H2 | HeadingLevel::H3)
    }

    /// The more important of two levels.
    pub fn most_important(self, other: HeadingLevel) -> HeadingLevel {
        self.min(other)
    }

    /// Level name as written in the output.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
            HeadingLevel::Body => "Body",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strongly the two providers agree on a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Both providers classified the text as a heading
    High,
    /// Only one provider did, and the text passed the strict test
    Medium,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => f.write_str("high"),
            Confidence::Medium => f.write_str("medium"),
        }
    }
}

/// A heading accepted by cross-validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingCandidate {
    /// Heading level
    pub level: HeadingLevel,
    /// Canonical heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Agreement tier
    pub confidence: Confidence,
}

impl HeadingCandidate {
    /// Create a new candidate.
    pub fn new(
        level: HeadingLevel,
        text: impl Into<String>,
        page: u32,
        confidence: Confidence,
    ) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            confidence,
        }
    }
}

/// One entry of the published outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level (H1-H3)
    pub level: HeadingLevel,
    /// Heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl From<&HeadingCandidate> for OutlineEntry {
    fn from(candidate: &HeadingCandidate) -> Self {
        Self {
            level: candidate.level,
            text: candidate.text.clone(),
            page: candidate.page,
        }
    }
}

/// Title plus H1-H3 heading list for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusOutline {
    /// Document title
    pub title: String,
    /// Headings sorted by (page, text)
    pub outline: Vec<OutlineEntry>,
}

impl ConsensusOutline {
    /// Build the published outline, keeping only H1-H3 candidates.
    pub fn from_candidates(title: impl Into<String>, candidates: &[HeadingCandidate]) -> Self {
        Self {
            title: title.into(),
            outline: candidates
                .iter()
                .filter(|c| c.level.is_outline_level())
                .map(OutlineEntry::from)
                .collect(),
        }
    }

    /// An outline with a title and no headings.
    pub fn untitled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Check if the outline has no headings.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}
