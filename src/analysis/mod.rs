//! Outline analysis.
//!
//! Font hierarchy inference, per-token heading classification, cross-provider
//! consensus, and title selection.

pub mod classifier;
pub mod consensus;
mod hierarchy;
mod options;
mod title;

pub use classifier::{passes_strict_test, HeadingClassifier, HEADING_PATTERNS};
pub use consensus::{
    dedup_candidates, sort_candidates, texts_similar, ClassifiedLayout, CrossValidator,
};
pub use hierarchy::{percentile, FontHierarchy, SizePercentiles};
pub use options::{GroupingTolerances, OutlineOptions};
pub use title::TitleExtractor;
