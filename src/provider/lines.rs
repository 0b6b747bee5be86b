//! Line/span provider.
//!
//! For backends that already group text into lines made of styled spans. Each
//! line becomes one token styled after its first span.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{BoundingBox, DocumentLayout, TextToken};

use super::TokenProvider;

/// Span flag bit marking a bold font.
pub const BOLD_FLAG: u32 = 1 << 4;

/// A styled span within a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Span text
    pub text: String,
    /// Font name
    pub font: String,
    /// Font size
    pub size: f32,
    /// Style flags (bit 4 = bold)
    #[serde(default)]
    pub flags: u32,
}

impl SpanRecord {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f32, flags: u32) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
            flags,
        }
    }

    /// Check the bold flag.
    pub fn is_bold(&self) -> bool {
        self.flags & BOLD_FLAG != 0
    }
}

/// A line of spans with its bounding box `[x0, top, x1, bottom]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Spans in reading order
    pub spans: Vec<SpanRecord>,
    /// Line bounding box
    pub bbox: [f32; 4],
}

impl LineRecord {
    /// Create a new line.
    pub fn new(spans: Vec<SpanRecord>, bbox: BoundingBox) -> Self {
        Self {
            spans,
            bbox: [bbox.x0, bbox.top, bbox.x1, bbox.bottom],
        }
    }

    /// Convert to a token, or `None` if the line is blank.
    ///
    /// Text is the concatenation of all spans; font, size and bold flag come
    /// from the first span. Size is rounded to one decimal.
    pub fn to_token(&self, page: u32) -> Option<TextToken> {
        let first = self.spans.first()?;
        let text: String = self.spans.iter().map(|s| s.text.as_str()).collect();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let [x0, top, x1, bottom] = self.bbox;
        Some(TextToken::new(
            text,
            first.font.clone(),
            (first.size * 10.0).round() / 10.0,
            first.is_bold(),
            page,
            BoundingBox::new(x0, top, x1, bottom),
        ))
    }
}

/// Provider over line/span pages.
pub struct LineSpanProvider<'a> {
    pages: &'a [Vec<LineRecord>],
}

impl<'a> LineSpanProvider<'a> {
    /// Create a provider over per-page line lists.
    pub fn new(pages: &'a [Vec<LineRecord>]) -> Self {
        Self { pages }
    }
}

impl TokenProvider for LineSpanProvider<'_> {
    fn name(&self) -> &str {
        "lines"
    }

    fn extract(&self) -> Result<DocumentLayout> {
        let pages: Vec<Vec<TextToken>> = self
            .pages
            .iter()
            .enumerate()
            .map(|(idx, lines)| {
                lines
                    .iter()
                    .filter_map(|line| line.to_token(idx as u32 + 1))
                    .collect()
            })
            .collect();

        log::debug!(
            "lines provider: {} pages, {} tokens",
            pages.len(),
            pages.iter().map(Vec::len).sum::<usize>()
        );

        Ok(DocumentLayout::new(self.name(), pages))
    }
}
