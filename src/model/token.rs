//! Text tokens and font signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned bounding box in provider units, top-down coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl BoundingBox {
    /// Create a bounding box from its four edges.
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self { x0, top, x1, bottom }
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A run of text with its rendering style and position, as produced by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToken {
    /// The text content
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in provider units
    pub size: f32,
    /// Whether the provider reports the run as bold
    pub bold: bool,
    /// Page number (1-indexed)
    pub page: u32,
    /// Bounding box on the page
    pub bbox: BoundingBox,
}

impl TextToken {
    /// Create a new token.
    pub fn new(
        text: impl Into<String>,
        font_name: impl Into<String>,
        size: f32,
        bold: bool,
        page: u32,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            text: text.into(),
            font_name: font_name.into(),
            size,
            bold,
            page,
            bbox,
        }
    }

    /// Font signature used to look up the token's hierarchy level.
    pub fn signature(&self) -> FontSignature {
        FontSignature::new(self.font_name.clone(), self.size, self.bold)
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// The (font name, size, bold) triple identifying a rendering style.
///
/// The size is quantized to tenths so signatures can be hashed and compared
/// exactly. Two tokens whose sizes round to the same tenth share a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontSignature {
    /// Font name
    pub font_name: String,
    size_tenths: i32,
    /// Bold flag
    pub bold: bool,
}

impl FontSignature {
    /// Create a signature, quantizing the size to 0.1 precision.
    pub fn new(font_name: impl Into<String>, size: f32, bold: bool) -> Self {
        Self {
            font_name: font_name.into(),
            size_tenths: (size * 10.0).round() as i32,
            bold,
        }
    }

    /// Quantized font size.
    pub fn size(&self) -> f32 {
        self.size_tenths as f32 / 10.0
    }
}

impl fmt::Display for FontSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}", self.font_name, self.size())?;
        if self.bold {
            write!(f, " bold")?;
        }
        Ok(())
    }
}
