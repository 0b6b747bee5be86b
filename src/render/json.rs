//! JSON rendering for outlines.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::ConsensusOutline;

use super::OutlineReport;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON (`{"title": ..., "outline": [...]}`).
pub fn to_json(outline: &ConsensusOutline, format: JsonFormat) -> Result<String> {
    serialize(outline, format)
}

/// Convert a full report (outline, candidates, statistics) to JSON.
pub fn report_to_json(report: &OutlineReport, format: JsonFormat) -> Result<String> {
    serialize(report, format)
}

fn serialize<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn outline() -> ConsensusOutline {
        ConsensusOutline {
            title: "Rapport annuel été".to_string(),
            outline: vec![OutlineEntry {
                level: HeadingLevel::H1,
                text: "Introduction".to_string(),
                page: 1,
            }],
        }
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&outline(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\n  \"outline\""));
        assert!(json.contains("\"level\": \"H1\""));
        // Non-ASCII text is written as-is.
        assert!(json.contains("été"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&outline(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let back: ConsensusOutline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outline());
    }

    #[test]
    fn test_report_to_json() {
        let report = OutlineReport::new(outline(), Vec::new());
        let json = report_to_json(&report, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"stats\""));
        assert!(json.contains("\"failures\":[]"));
    }
}
