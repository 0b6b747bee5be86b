//! Outline result with candidates and statistics.

use crate::model::{Confidence, ConsensusOutline, HeadingCandidate};
use serde::{Deserialize, Serialize};

/// Result of processing one document, including diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineReport {
    /// The published outline (title plus H1-H3 headings)
    pub outline: ConsensusOutline,

    /// Every consensus candidate, including H4, with confidence
    pub candidates: Vec<HeadingCandidate>,

    /// Extraction statistics
    pub stats: OutlineStats,

    /// Non-fatal problems encountered (provider failures, empty layouts)
    pub failures: Vec<String>,
}

impl OutlineReport {
    /// Create a report from an outline and its candidates.
    pub fn new(outline: ConsensusOutline, candidates: Vec<HeadingCandidate>) -> Self {
        let stats = OutlineStats::from_candidates(&candidates, outline.len());
        Self {
            outline,
            candidates,
            stats,
            failures: Vec::new(),
        }
    }

    /// Check if any provider reported a problem.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Title of the document.
    pub fn title(&self) -> &str {
        &self.outline.title
    }
}

/// Per-provider statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderStats {
    /// Provider name
    pub name: String,

    /// Number of pages in the layout
    pub page_count: usize,

    /// Number of tokens in the layout
    pub token_count: usize,

    /// Tokens the provider's classification marked as headings
    pub heading_count: usize,

    /// Body text size inferred from the font multiset
    pub body_size: f32,

    /// Distinct font signatures
    pub signature_count: usize,
}

/// Statistics collected while building an outline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineStats {
    /// Providers that produced a layout
    pub providers: Vec<ProviderStats>,

    /// Candidates both providers agreed on
    pub high_confidence: u32,

    /// Candidates only one provider vouched for
    pub medium_confidence: u32,

    /// Entries in the published outline
    pub outline_count: u32,
}

impl OutlineStats {
    /// Count confidence tiers over candidates.
    pub fn from_candidates(candidates: &[HeadingCandidate], outline_count: usize) -> Self {
        let high = candidates
            .iter()
            .filter(|c| c.confidence == Confidence::High)
            .count();
        Self {
            providers: Vec::new(),
            high_confidence: high as u32,
            medium_confidence: (candidates.len() - high) as u32,
            outline_count: outline_count as u32,
        }
    }

    /// Record a provider's layout statistics.
    pub fn add_provider(&mut self, provider: ProviderStats) {
        self.providers.push(provider);
    }

    /// Total candidates across both tiers.
    pub fn candidate_count(&self) -> u32 {
        self.high_confidence + self.medium_confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_stats_from_candidates() {
        let candidates = vec![
            HeadingCandidate::new(HeadingLevel::H1, "Intro", 1, Confidence::High),
            HeadingCandidate::new(HeadingLevel::H4, "Aside", 1, Confidence::Medium),
            HeadingCandidate::new(HeadingLevel::H2, "Scope", 2, Confidence::High),
        ];
        let outline = ConsensusOutline::from_candidates("Doc", &candidates);
        let report = OutlineReport::new(outline, candidates);

        assert_eq!(report.stats.high_confidence, 2);
        assert_eq!(report.stats.medium_confidence, 1);
        assert_eq!(report.stats.candidate_count(), 3);
        assert_eq!(report.stats.outline_count, 2);
        assert_eq!(report.title(), "Doc");
        assert!(!report.has_failures());
    }
}
