//! Layout dump input format.
//!
//! A dump carries the raw output of both extraction backends for one
//! document:
//!
//! ```json
//! {
//!   "chars": [[{"text": "A", "fontname": "Arial", "size": 12, "x0": 0, "top": 0, "x1": 6, "bottom": 12}]],
//!   "lines": [[{"spans": [{"text": "A", "font": "Arial", "size": 12, "flags": 0}], "bbox": [0, 0, 6, 12]}]]
//! }
//! ```
//!
//! Either section may be `null` or absent when its backend failed. Any other
//! top-level field is rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::GroupingTolerances;
use crate::error::Result;

use super::{
    CharGroupingProvider, CharRecord, LineRecord, LineSpanProvider, TokenProvider,
    UnavailableProvider,
};

/// Raw per-page primitives from both backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutDump {
    /// Character records per page
    #[serde(default)]
    pub chars: Option<Vec<Vec<CharRecord>>>,
    /// Line records per page
    #[serde(default)]
    pub lines: Option<Vec<Vec<LineRecord>>>,
}

impl LayoutDump {
    /// Parse a dump from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a dump from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Provider over the character section.
    pub fn char_provider(&self, tolerances: GroupingTolerances) -> Box<dyn TokenProvider + '_> {
        match &self.chars {
            Some(pages) => Box::new(CharGroupingProvider::new(pages, tolerances)),
            None => Box::new(UnavailableProvider::new("chars", "no character data")),
        }
    }

    /// Provider over the line section.
    pub fn line_provider(&self) -> Box<dyn TokenProvider + '_> {
        match &self.lines {
            Some(pages) => Box::new(LineSpanProvider::new(pages)),
            None => Box::new(UnavailableProvider::new("lines", "no line data")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_parses_both_sections() {
        let json = r#"{
            "chars": [[{"text": "A", "fontname": "Arial", "size": 12, "x0": 0, "top": 0, "x1": 6, "bottom": 12}]],
            "lines": [[{"spans": [{"text": "A", "font": "Arial", "size": 12, "flags": 0}], "bbox": [0, 0, 6, 12]}]]
        }"#;
        let dump = LayoutDump::from_json(json).unwrap();
        assert_eq!(dump.chars.as_ref().unwrap()[0][0].font_name, "Arial");

        let chars = dump.char_provider(GroupingTolerances::default()).extract().unwrap();
        let lines = dump.line_provider().extract().unwrap();
        assert_eq!(chars.token_count(), 1);
        assert_eq!(lines.token_count(), 1);
    }

    #[test]
    fn test_dump_missing_section_fails_provider() {
        let dump = LayoutDump::from_json(r#"{"lines": null}"#).unwrap();
        assert!(dump.char_provider(GroupingTolerances::default()).extract().is_err());
        assert!(dump.line_provider().extract().is_err());
    }

    #[test]
    fn test_dump_invalid_json() {
        assert!(LayoutDump::from_json("not json").is_err());
    }

    #[test]
    fn test_dump_rejects_outline_json() {
        let outline = r#"{"title": "Report", "outline": []}"#;
        assert!(matches!(
            LayoutDump::from_json(outline),
            Err(crate::error::Error::Json(_))
        ));
    }
}
