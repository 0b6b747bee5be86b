//! Character-granularity provider.
//!
//! Merges individual glyph records into line/run tokens by reading order and
//! proximity, without relying on any structural metadata.

use serde::{Deserialize, Serialize};

use crate::analysis::GroupingTolerances;
use crate::error::Result;
use crate::model::{BoundingBox, DocumentLayout, TextToken};

use super::TokenProvider;

/// A single character with position and font information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharRecord {
    /// The character text (usually one code point)
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    #[serde(alias = "fontname")]
    pub font_name: String,
    /// Font size
    pub size: f32,
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl CharRecord {
    /// Create a new character record.
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        size: f32,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            size,
            x0: bbox.x0,
            top: bbox.top,
            x1: bbox.x1,
            bottom: bbox.bottom,
        }
    }

    /// Bold is derived from the font name.
    pub fn is_bold(&self) -> bool {
        self.font_name.contains("Bold")
    }

    /// Bounding box of the character.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.x0, self.top, self.x1, self.bottom)
    }
}

/// The run being built while walking sorted characters.
struct Run {
    text: String,
    font_name: String,
    size: f32,
    bold: bool,
    /// Top of the first character; proximity is measured against it
    anchor_top: f32,
    bbox: BoundingBox,
}

impl Run {
    fn start(ch: &CharRecord) -> Self {
        Self {
            text: ch.text.clone(),
            font_name: ch.font_name.clone(),
            size: ch.size,
            bold: ch.is_bold(),
            anchor_top: ch.top,
            bbox: ch.bbox(),
        }
    }

    fn accepts(&self, ch: &CharRecord, tolerances: &GroupingTolerances) -> bool {
        (ch.top - self.anchor_top).abs() < tolerances.line
            && ch.font_name == self.font_name
            && (ch.size - self.size).abs() < tolerances.size
            && ch.x0 - self.bbox.x1 < tolerances.gap
    }

    fn extend(&mut self, ch: &CharRecord) {
        self.text.push_str(&ch.text);
        self.bbox = self.bbox.union(&ch.bbox());
    }

    fn into_token(self, page: u32) -> Option<TextToken> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(TextToken::new(
            text,
            self.font_name,
            self.size,
            self.bold,
            page,
            self.bbox,
        ))
    }
}

/// Group one page of characters into run tokens.
///
/// Characters are sorted top-to-bottom, then left-to-right. A character joins
/// the current run when it sits on the same line, uses the same font name and
/// a near-identical size, and follows the run's right edge closely; otherwise
/// the run is emitted (unless blank) and a new one starts.
pub fn group_chars(
    chars: &[CharRecord],
    page: u32,
    tolerances: &GroupingTolerances,
) -> Vec<TextToken> {
    let mut sorted: Vec<&CharRecord> = chars.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

    let mut tokens = Vec::new();
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return tokens;
    };

    let mut current = Run::start(first);
    for ch in iter {
        if current.accepts(ch, tolerances) {
            current.extend(ch);
        } else {
            let finished = std::mem::replace(&mut current, Run::start(ch));
            tokens.extend(finished.into_token(page));
        }
    }
    tokens.extend(current.into_token(page));

    tokens
}

/// Provider over character-granularity pages.
pub struct CharGroupingProvider<'a> {
    pages: &'a [Vec<CharRecord>],
    tolerances: GroupingTolerances,
}

impl<'a> CharGroupingProvider<'a> {
    /// Create a provider over per-page character lists.
    pub fn new(pages: &'a [Vec<CharRecord>], tolerances: GroupingTolerances) -> Self {
        Self { pages, tolerances }
    }
}

impl TokenProvider for CharGroupingProvider<'_> {
    fn name(&self) -> &str {
        "chars"
    }

    fn extract(&self) -> Result<DocumentLayout> {
        let pages: Vec<Vec<TextToken>> = self
            .pages
            .iter()
            .enumerate()
            .map(|(idx, chars)| group_chars(chars, idx as u32 + 1, &self.tolerances))
            .collect();

        log::debug!(
            "chars provider: {} pages, {} tokens",
            pages.len(),
            pages.iter().map(Vec::len).sum::<usize>()
        );

        Ok(DocumentLayout::new(self.name(), pages))
    }
}
