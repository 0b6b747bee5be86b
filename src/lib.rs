//! # pdfoutline
//!
//! Hybrid heading and outline extraction for PDF documents.
//!
//! Two independent layout providers describe the same document. Each
//! provider's font usage is turned into a size hierarchy, every token is
//! classified as a heading or body text, and the two classifications are
//! cross-validated into a single outline of H1-H3 headings plus a title.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_from_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     // Build an outline from a layout dump
//!     let report = extract_outline_from_file("document.json")?;
//!
//!     // Serialize the outline
//!     let json = render::to_json(&report.outline, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two-provider consensus**: headings confirmed by both providers are high confidence
//! - **Graceful degradation**: a failing provider never aborts the document
//! - **Font hierarchy**: percentile-based size levels with bold-aware rules
//! - **Parallel processing**: Uses Rayon for providers, pages, and batches

pub mod analysis;
pub mod batch;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    ClassifiedLayout, CrossValidator, FontHierarchy, GroupingTolerances, HeadingClassifier,
    OutlineOptions, TitleExtractor,
};
pub use batch::{BatchOutcome, BatchProcessor, BatchSummary};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, Confidence, ConsensusOutline, DocumentLayout, FontSignature, HeadingCandidate,
    HeadingLevel, OutlineEntry, TextToken,
};
pub use provider::{LayoutDump, TokenProvider};
pub use render::{JsonFormat, OutlineReport, OutlineStats, ProviderStats};

use std::path::Path;

/// Build an outline from two providers with default options.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, DocumentLayout};
///
/// let a = DocumentLayout::new("a", vec![vec![]]);
/// let b = DocumentLayout::new("b", vec![vec![]]);
/// let outline = extract_outline(&a, &b);
/// assert_eq!(outline.title, "Untitled Document");
/// assert!(outline.is_empty());
/// ```
pub fn extract_outline(first: &dyn TokenProvider, second: &dyn TokenProvider) -> ConsensusOutline {
    Outliner::new().run(first, second).outline
}

/// Build an outline report from two providers with custom options.
pub fn extract_outline_with_options(
    first: &dyn TokenProvider,
    second: &dyn TokenProvider,
    options: OutlineOptions,
) -> OutlineReport {
    Outliner::new().with_options(options).run(first, second)
}

/// Build an outline report from a parsed layout dump.
///
/// The dump's character section feeds the first provider and its line
/// section the second; a missing section counts as a failed provider.
pub fn extract_outline_from_dump(dump: &LayoutDump, options: &OutlineOptions) -> OutlineReport {
    Outliner::new().with_options(options.clone()).run_dump(dump)
}

/// Read a layout dump file and build its outline report.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_outline_from_file;
///
/// let report = extract_outline_from_file("document.json").unwrap();
/// println!("{}: {} headings", report.outline.title, report.outline.len());
/// ```
pub fn extract_outline_from_file<P: AsRef<Path>>(path: P) -> Result<OutlineReport> {
    Outliner::new().run_file(path)
}

/// Builder for running the outline pipeline.
///
/// # Example
///
/// ```
/// use pdfoutline::{DocumentLayout, Outliner};
///
/// let a = DocumentLayout::new("a", vec![vec![]]);
/// let b = DocumentLayout::new("b", vec![vec![]]);
/// let report = Outliner::new()
///     .sequential()
///     .with_fallback_title("No Title")
///     .run(&a, &b);
/// assert_eq!(report.outline.title, "No Title");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    options: OutlineOptions,
}

impl Outliner {
    /// Create a new outliner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options.
    pub fn with_options(mut self, options: OutlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Match heading patterns case-insensitively.
    pub fn ignore_pattern_case(mut self) -> Self {
        self.options = self.options.ignore_pattern_case();
        self
    }

    /// Set the title used when no candidate qualifies.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_fallback_title(title);
        self
    }

    /// The active options.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Run both providers and build the consensus outline.
    ///
    /// Provider failures are logged and recorded in the report's
    /// `failures`; they never abort the document.
    pub fn run(&self, first: &dyn TokenProvider, second: &dyn TokenProvider) -> OutlineReport {
        let classifier = HeadingClassifier::new(&self.options);
        let classify = |provider: &dyn TokenProvider| {
            provider
                .extract()
                .map(|layout| ClassifiedLayout::new(layout, &classifier))
        };

        let (result_a, result_b) = if self.options.parallel {
            rayon::join(|| classify(first), || classify(second))
        } else {
            (classify(first), classify(second))
        };

        let mut failures = Vec::new();
        let a = accept(first.name(), result_a, &mut failures);
        let b = accept(second.name(), result_b, &mut failures);

        // A layout without tokens cannot vouch for anything; merge the other alone.
        let has_tokens = |c: &&ClassifiedLayout| !c.layout().is_empty();
        let candidates = CrossValidator::new(self.options.parallel)
            .merge(a.as_ref().filter(has_tokens), b.as_ref().filter(has_tokens));
        let title = TitleExtractor::new(&self.options)
            .extract(a.iter().chain(b.iter()).map(ClassifiedLayout::layout));
        let outline = ConsensusOutline::from_candidates(title, &candidates);

        log::info!(
            "outline '{}': {} headings from {} candidates",
            outline.title,
            outline.len(),
            candidates.len()
        );

        let mut report = OutlineReport::new(outline, candidates);
        for classified in a.iter().chain(b.iter()) {
            report.stats.add_provider(provider_stats(classified));
        }
        report.failures = failures;
        report
    }

    /// Run the pipeline over a parsed layout dump.
    pub fn run_dump(&self, dump: &LayoutDump) -> OutlineReport {
        let chars = dump.char_provider(self.options.grouping);
        let lines = dump.line_provider();
        self.run(chars.as_ref(), lines.as_ref())
    }

    /// Read a layout dump file and run the pipeline over it.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<OutlineReport> {
        let dump = LayoutDump::from_file(path)?;
        Ok(self.run_dump(&dump))
    }
}

/// Keep a successful layout, recording failures and degenerate input.
fn accept(
    name: &str,
    result: Result<ClassifiedLayout>,
    failures: &mut Vec<String>,
) -> Option<ClassifiedLayout> {
    let classified = match result {
        Ok(classified) => classified,
        Err(e) => {
            log::warn!("{}", e);
            failures.push(e.to_string());
            return None;
        }
    };

    let layout = classified.layout();
    let problem = if layout.is_empty() {
        Some(Error::EmptyLayout(name.to_string()))
    } else if classified.hierarchy().is_empty() {
        Some(Error::DegenerateHierarchy(name.to_string()))
    } else {
        None
    };
    if let Some(e) = problem {
        log::warn!("{}", e);
        failures.push(e.to_string());
    }

    Some(classified)
}

fn provider_stats(classified: &ClassifiedLayout) -> ProviderStats {
    let layout = classified.layout();
    ProviderStats {
        name: layout.provider.clone(),
        page_count: layout.page_count(),
        token_count: layout.token_count(),
        heading_count: classified.heading_count(),
        body_size: classified.hierarchy().body_size(),
        signature_count: classified.hierarchy().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::UnavailableProvider;

    fn token(text: &str, size: f32, bold: bool, page: u32) -> TextToken {
        let font = if bold { "Helvetica-Bold" } else { "Times" };
        TextToken::new(text, font, size, bold, page, BoundingBox::default())
    }

    fn sample_layout(provider: &str) -> DocumentLayout {
        let mut page1 = vec![
            token("Annual Report 2024", 24.0, true, 1),
            token("Introduction", 18.0, true, 1),
        ];
        let mut page2 = vec![token("Methods", 18.0, true, 2)];
        for i in 0..30 {
            page1.push(token(&format!("body text line {}", i), 10.0, false, 1));
            page2.push(token(&format!("more body text {}", i), 10.0, false, 2));
        }
        DocumentLayout::new(provider, vec![page1, page2])
    }

    #[test]
    fn test_outliner_builder() {
        let outliner = Outliner::new()
            .sequential()
            .ignore_pattern_case()
            .with_fallback_title("None");
        assert!(!outliner.options().parallel);
        assert!(outliner.options().case_insensitive_patterns);
        assert_eq!(outliner.options().fallback_title, "None");
    }

    #[test]
    fn test_run_agreeing_providers() {
        let a = sample_layout("a");
        let b = sample_layout("b");
        let report = Outliner::new().sequential().run(&a, &b);

        assert_eq!(report.outline.title, "Annual Report 2024");
        assert!(!report.has_failures());
        assert_eq!(report.stats.providers.len(), 2);
        assert!(report
            .candidates
            .iter()
            .filter(|c| c.text == "Introduction" || c.text == "Methods")
            .all(|c| c.confidence == Confidence::High));
        let pages: Vec<u32> = report.outline.outline.iter().map(|e| e.page).collect();
        let mut sorted = pages.clone();
        sorted.sort();
        assert_eq!(pages, sorted);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let a = sample_layout("a");
        let b = sample_layout("b");
        let parallel = Outliner::new().run(&a, &b);
        let sequential = Outliner::new().sequential().run(&a, &b);
        assert_eq!(parallel.outline, sequential.outline);
        assert_eq!(parallel.candidates, sequential.candidates);
    }

    #[test]
    fn test_failed_provider_is_recorded() {
        let a = sample_layout("a");
        let broken = UnavailableProvider::new("lines", "backend crashed");
        let report = Outliner::new().sequential().run(&a, &broken);

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("backend crashed"));
        assert_eq!(report.stats.providers.len(), 1);
        assert!(report
            .candidates
            .iter()
            .all(|c| c.confidence == Confidence::Medium));
        assert!(report.outline.outline.iter().any(|e| e.text == "Introduction"));
    }

    #[test]
    fn test_both_providers_failed() {
        let a = UnavailableProvider::new("chars", "no data");
        let b = UnavailableProvider::new("lines", "no data");
        let report = Outliner::new().run(&a, &b);
        assert_eq!(report.outline, ConsensusOutline::untitled("Untitled Document"));
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_empty_layout_is_recorded() {
        let a = sample_layout("a");
        let empty = DocumentLayout::new("lines", vec![vec![], vec![]]);
        let report = Outliner::new().sequential().run(&a, &empty);

        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("no text tokens"));
        // Title still comes from the healthy provider.
        assert_eq!(report.outline.title, "Annual Report 2024");
    }

    #[test]
    fn test_empty_layout_falls_back_to_single_source() {
        let a = sample_layout("a");
        for empty in [
            DocumentLayout::new("lines", vec![]),
            DocumentLayout::new("lines", vec![vec![], vec![]]),
        ] {
            let report = Outliner::new().sequential().run(&a, &empty);

            assert_eq!(report.failures.len(), 1);
            assert!(report.outline.outline.iter().any(|e| e.text == "Introduction"));
            assert!(report.outline.outline.iter().any(|e| e.text == "Methods"));
            assert!(report
                .candidates
                .iter()
                .all(|c| c.confidence == Confidence::Medium));
            assert_eq!(report.stats.providers.len(), 2);
        }
    }

    #[test]
    fn test_extract_outline_from_dump() {
        let dump = LayoutDump::from_json(r#"{"chars": null, "lines": null}"#).unwrap();
        let report = extract_outline_from_dump(&dump, &OutlineOptions::default());
        assert!(report.outline.is_empty());
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_extract_outline_from_missing_file() {
        let result = extract_outline_from_file("/nonexistent/path/dump.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
