//! Cross-validation of two independently classified layouts.
//!
//! Token pairs with similar text on the same page are classified by both
//! providers; agreement yields high-confidence headings, a single vote yields
//! a medium-confidence heading when the text passes the strict test.
//!
//! Known limitation: similarity accepts substring containment for texts
//! longer than five characters, so a short heading such as "Summary" also
//! pairs with an unrelated longer line such as "Executive Summary".

use std::collections::HashSet;

use rayon::prelude::*;

use crate::model::{Confidence, DocumentLayout, HeadingCandidate, HeadingLevel, TextToken};

use super::classifier::passes_strict_test;
use super::{FontHierarchy, HeadingClassifier};

/// Minimum normalized length for substring similarity.
const MIN_SUBSTRING_CHARS: usize = 5;

/// A layout with its hierarchy and a heading label per token.
#[derive(Debug, Clone)]
pub struct ClassifiedLayout {
    layout: DocumentLayout,
    hierarchy: FontHierarchy,
    labels: Vec<Vec<Option<HeadingLevel>>>,
}

impl ClassifiedLayout {
    /// Analyze the layout's fonts and classify every token.
    pub fn new(layout: DocumentLayout, classifier: &HeadingClassifier) -> Self {
        let hierarchy = FontHierarchy::analyze(layout.font_multiset());
        let labels = layout
            .pages()
            .iter()
            .map(|page| {
                page.iter()
                    .map(|token| classifier.classify(token, &hierarchy))
                    .collect()
            })
            .collect();
        Self {
            layout,
            hierarchy,
            labels,
        }
    }

    /// The underlying layout.
    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// The layout's font hierarchy.
    pub fn hierarchy(&self) -> &FontHierarchy {
        &self.hierarchy
    }

    /// Tokens of a page zipped with their labels.
    pub fn labeled_page(
        &self,
        index: usize,
    ) -> impl Iterator<Item = (&TextToken, Option<HeadingLevel>)> + '_ {
        let tokens = self.layout.page(index).unwrap_or(&[]);
        let labels = self.labels.get(index).map(Vec::as_slice).unwrap_or(&[]);
        tokens.iter().zip(labels.iter().copied())
    }

    /// Number of tokens labeled as a heading.
    pub fn heading_count(&self) -> usize {
        self.labels.iter().flatten().filter(|l| l.is_some()).count()
    }
}

/// Merges two labeled layouts into a consensus candidate list.
#[derive(Debug, Clone, Copy)]
pub struct CrossValidator {
    parallel: bool,
}

impl CrossValidator {
    /// Create a validator; `parallel` merges pages on the rayon pool.
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Merge the providers' layouts into deduplicated, sorted candidates.
    ///
    /// With only one layout present, its strict-test-passing headings become
    /// medium-confidence candidates. With none, the result is empty.
    pub fn merge(
        &self,
        first: Option<&ClassifiedLayout>,
        second: Option<&ClassifiedLayout>,
    ) -> Vec<HeadingCandidate> {
        let per_page: Vec<Vec<HeadingCandidate>> = match (first, second) {
            (Some(a), Some(b)) => {
                let pages = a.layout.page_count().min(b.layout.page_count());
                if self.parallel {
                    (0..pages)
                        .into_par_iter()
                        .map(|idx| page_consensus(a, b, idx))
                        .collect()
                } else {
                    (0..pages).map(|idx| page_consensus(a, b, idx)).collect()
                }
            }
            (Some(only), None) | (None, Some(only)) => {
                log::debug!(
                    "single-source consensus from provider '{}'",
                    only.layout.provider
                );
                (0..only.layout.page_count())
                    .map(|idx| single_source(only, idx))
                    .collect()
            }
            (None, None) => Vec::new(),
        };

        let mut candidates = dedup_candidates(per_page.into_iter().flatten());
        sort_candidates(&mut candidates);
        candidates
    }
}

impl Default for CrossValidator {
    fn default() -> Self {
        Self::new(true)
    }
}

fn page_consensus(a: &ClassifiedLayout, b: &ClassifiedLayout, idx: usize) -> Vec<HeadingCandidate> {
    let mut out = Vec::new();
    for (tok_a, level_a) in a.labeled_page(idx) {
        let text = tok_a.trimmed();
        for (tok_b, level_b) in b.labeled_page(idx) {
            if !texts_similar(text, tok_b.trimmed()) {
                continue;
            }
            match (level_a, level_b) {
                (Some(la), Some(lb)) => out.push(HeadingCandidate::new(
                    la.most_important(lb),
                    text,
                    tok_a.page,
                    Confidence::High,
                )),
                (Some(level), None) | (None, Some(level)) if passes_strict_test(text) => {
                    out.push(HeadingCandidate::new(
                        level,
                        text,
                        tok_a.page,
                        Confidence::Medium,
                    ))
                }
                _ => {}
            }
        }
    }
    out
}

fn single_source(layout: &ClassifiedLayout, idx: usize) -> Vec<HeadingCandidate> {
    layout
        .labeled_page(idx)
        .filter_map(|(token, level)| {
            let text = token.trimmed();
            match level {
                Some(level) if passes_strict_test(text) => Some(HeadingCandidate::new(
                    level,
                    text,
                    token.page,
                    Confidence::Medium,
                )),
                _ => None,
            }
        })
        .collect()
}

/// Lowercase and collapse runs of whitespace into single spaces.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether two token texts refer to the same line.
pub fn texts_similar(a: &str, b: &str) -> bool {
    let a = normalize_text(a);
    let b = normalize_text(b);
    if a == b {
        return true;
    }
    a.chars().count() > MIN_SUBSTRING_CHARS
        && b.chars().count() > MIN_SUBSTRING_CHARS
        && (a.contains(&b) || b.contains(&a))
}

/// Keep the first candidate for each exact text.
pub fn dedup_candidates(
    candidates: impl IntoIterator<Item = HeadingCandidate>,
) -> Vec<HeadingCandidate> {
    candidates
        .into_iter()
        .fold(
            (HashSet::new(), Vec::new()),
            |(mut seen, mut kept): (HashSet<String>, Vec<HeadingCandidate>), candidate| {
                if seen.insert(candidate.text.clone()) {
                    kept.push(candidate);
                }
                (seen, kept)
            },
        )
        .1
}

/// Sort ascending by (page, text).
pub fn sort_candidates(candidates: &mut [HeadingCandidate]) {
    candidates.sort_by(|a, b| a.page.cmp(&b.page).then_with(|| a.text.cmp(&b.text)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::OutlineOptions;
    use crate::model::BoundingBox;

    fn token(text: &str, size: f32, bold: bool, page: u32) -> TextToken {
        let font = if bold { "Arial-Bold" } else { "Times" };
        TextToken::new(text, font, size, bold, page, BoundingBox::default())
    }

    fn body_page(page: u32) -> Vec<TextToken> {
        (0..20)
            .map(|i| {
                token(
                    &format!("the quick brown fox number {} jumps over it", i),
                    10.0,
                    false,
                    page,
                )
            })
            .collect()
    }

    fn classified(provider: &str, pages: Vec<Vec<TextToken>>) -> ClassifiedLayout {
        let classifier = HeadingClassifier::new(&OutlineOptions::default());
        ClassifiedLayout::new(DocumentLayout::new(provider, pages), &classifier)
    }

    fn with_heading(page: u32, heading: TextToken) -> Vec<TextToken> {
        let mut tokens = vec![heading];
        tokens.extend(body_page(page));
        tokens
    }

    #[test]
    fn test_texts_similar() {
        assert!(texts_similar("Results", "results"));
        assert!(texts_similar("Executive   Summary", "executive summary"));
        assert!(texts_similar("Executive Summary", "Summary"));
        assert!(!texts_similar("Notes", "Notes on this"));
        assert!(!texts_similar("Intro", "Outro"));
    }

    #[test]
    fn test_both_agree_is_high() {
        let a = classified("a", vec![with_heading(1, token("Chapter 1: Overview", 24.0, true, 1))]);
        let b = classified("b", vec![with_heading(1, token("Chapter 1: Overview", 24.0, true, 1))]);
        let candidates = CrossValidator::new(false).merge(Some(&a), Some(&b));

        let heading = candidates
            .iter()
            .find(|c| c.text == "Chapter 1: Overview")
            .unwrap();
        assert_eq!(heading.level, HeadingLevel::H1);
        assert_eq!(heading.confidence, Confidence::High);
        assert_eq!(heading.page, 1);
    }

    #[test]
    fn test_body_lines_are_not_headings() {
        let a = classified("a", vec![body_page(1)]);
        let b = classified("b", vec![body_page(1)]);
        // A uniform body font sits on every percentile and resolves to H1,
        // but lowercase lines fail every pattern and shape test.
        assert!(CrossValidator::new(false).merge(Some(&a), Some(&b)).is_empty());
    }

    #[test]
    fn test_single_vote_requires_strict_test() {
        // Provider B sees the same text in body style.
        let a = classified("a", vec![with_heading(1, token("NOTES", 24.0, true, 1))]);
        let mut b_page = body_page(1);
        b_page.push(token("NOTES", 9.0, false, 1));
        let b = classified("b", vec![b_page]);

        let candidates = CrossValidator::new(false).merge(Some(&a), Some(&b));
        let notes = candidates.iter().find(|c| c.text == "NOTES").unwrap();
        assert_eq!(notes.confidence, Confidence::Medium);
        assert_eq!(notes.level, HeadingLevel::H1);
    }

    #[test]
    fn test_single_source_degradation() {
        let a = classified(
            "a",
            vec![
                with_heading(1, token("Introduction", 24.0, true, 1)),
                with_heading(2, token("x?", 24.0, true, 2)),
            ],
        );
        let candidates = CrossValidator::new(false).merge(None, Some(&a));
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].text, "Introduction");
        assert_eq!(candidates[0].confidence, Confidence::Medium);

        assert!(CrossValidator::new(false).merge(None, None).is_empty());
    }

    #[test]
    fn test_pages_aligned_to_shorter_layout() {
        let a = classified(
            "a",
            vec![
                with_heading(1, token("Overview", 24.0, true, 1)),
                with_heading(2, token("Methods", 24.0, true, 2)),
            ],
        );
        let b = classified("b", vec![with_heading(1, token("Overview", 24.0, true, 1))]);
        let candidates = CrossValidator::new(false).merge(Some(&a), Some(&b));
        assert!(candidates.iter().all(|c| c.page == 1));
        assert!(candidates.iter().any(|c| c.text == "Overview"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let pages_a: Vec<Vec<TextToken>> = (1..=4)
            .map(|p| with_heading(p, token(&format!("Part {}", p), 24.0, true, p)))
            .collect();
        let a = classified("a", pages_a.clone());
        let b = classified("b", pages_a);
        assert_eq!(
            CrossValidator::new(true).merge(Some(&a), Some(&b)),
            CrossValidator::new(false).merge(Some(&a), Some(&b))
        );
    }

    #[test]
    fn test_dedup_and_sort() {
        let candidates = vec![
            HeadingCandidate::new(HeadingLevel::H2, "Results", 3, Confidence::High),
            HeadingCandidate::new(HeadingLevel::H1, "Abstract", 1, Confidence::High),
            HeadingCandidate::new(HeadingLevel::H1, "Results", 1, Confidence::Medium),
            HeadingCandidate::new(HeadingLevel::H3, "Aims", 3, Confidence::High),
        ];
        let mut deduped = dedup_candidates(candidates);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].page, 3);

        sort_candidates(&mut deduped);
        let keys: Vec<(u32, &str)> = deduped.iter().map(|c| (c.page, c.text.as_str())).collect();
        assert_eq!(keys, vec![(1, "Abstract"), (3, "Aims"), (3, "Results")]);

        let again = dedup_candidates(deduped.clone());
        assert_eq!(again, deduped);
    }
}
