//! Per-provider document layout.

use super::{FontSignature, TextToken};
use serde::Serialize;

/// Page-ordered tokens from one provider, plus the font multiset observed in them.
///
/// Built once per (document, provider) pair and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentLayout {
    /// Name of the provider that produced this layout
    pub provider: String,
    pages: Vec<Vec<TextToken>>,
    font_multiset: Vec<FontSignature>,
}

impl DocumentLayout {
    /// Build a layout from page-ordered tokens.
    ///
    /// The font multiset is the occurrence list of every token's signature
    /// in page and reading order.
    pub fn new(provider: impl Into<String>, pages: Vec<Vec<TextToken>>) -> Self {
        let font_multiset = pages
            .iter()
            .flat_map(|page| page.iter().map(TextToken::signature))
            .collect();
        Self {
            provider: provider.into(),
            pages,
            font_multiset,
        }
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[Vec<TextToken>] {
        &self.pages
    }

    /// Tokens of a page by index (0-based).
    pub fn page(&self, index: usize) -> Option<&[TextToken]> {
        self.pages.get(index).map(Vec::as_slice)
    }

    /// Tokens of the first page, empty if there are no pages.
    pub fn first_page(&self) -> &[TextToken] {
        self.page(0).unwrap_or(&[])
    }

    /// Every token's font signature, in occurrence order.
    pub fn font_multiset(&self) -> &[FontSignature] {
        &self.font_multiset
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of tokens across all pages.
    pub fn token_count(&self) -> usize {
        self.font_multiset.len()
    }

    /// Check if the layout has no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.font_multiset.is_empty()
    }

    /// Iterate over all tokens in page order.
    pub fn tokens(&self) -> impl Iterator<Item = &TextToken> {
        self.pages.iter().flatten()
    }
}
