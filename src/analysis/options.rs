//! Outline extraction options and configuration.

/// Proximity tolerances used when merging characters into runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupingTolerances {
    /// Maximum vertical distance between a character's top and the run's top
    pub line: f32,
    /// Maximum font size difference within a run
    pub size: f32,
    /// Maximum horizontal gap between the run's right edge and the next character
    pub gap: f32,
}

impl Default for GroupingTolerances {
    fn default() -> Self {
        Self {
            line: 3.0,
            size: 0.5,
            gap: 10.0,
        }
    }
}

/// Options for outline extraction.
#[derive(Debug, Clone)]
pub struct OutlineOptions {
    /// Tolerances for the character grouping provider
    pub grouping: GroupingTolerances,

    /// Body-level tokens must exceed `body_size * body_margin` to stay in play
    pub body_margin: f32,

    /// Match heading patterns without regard to case
    pub case_insensitive_patterns: bool,

    /// Number of leading first-page tokens inspected for a title
    pub title_scan_tokens: usize,

    /// Minimum font size of a title candidate
    pub title_min_size: f32,

    /// Title used when no candidate qualifies
    pub fallback_title: String,

    /// Whether to use parallel processing
    pub parallel: bool,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set grouping tolerances.
    pub fn with_grouping(mut self, grouping: GroupingTolerances) -> Self {
        self.grouping = grouping;
        self
    }

    /// Set the body size margin.
    pub fn with_body_margin(mut self, margin: f32) -> Self {
        self.body_margin = margin;
        self
    }

    /// Match heading patterns case-insensitively.
    pub fn ignore_pattern_case(mut self) -> Self {
        self.case_insensitive_patterns = true;
        self
    }

    /// Set the number of first-page tokens scanned for a title.
    pub fn with_title_scan_tokens(mut self, count: usize) -> Self {
        self.title_scan_tokens = count;
        self
    }

    /// Set the minimum title font size.
    pub fn with_title_min_size(mut self, size: f32) -> Self {
        self.title_min_size = size;
        self
    }

    /// Set the fallback title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            grouping: GroupingTolerances::default(),
            body_margin: 1.02,
            case_insensitive_patterns: false,
            title_scan_tokens: 10,
            title_min_size: 14.0,
            fallback_title: "Untitled Document".to_string(),
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_options_builder() {
        let options = OutlineOptions::new()
            .ignore_pattern_case()
            .with_title_min_size(16.0)
            .with_fallback_title("Unknown")
            .sequential();

        assert!(options.case_insensitive_patterns);
        assert_eq!(options.title_min_size, 16.0);
        assert_eq!(options.fallback_title, "Unknown");
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = OutlineOptions::default();
        assert!(options.parallel);
        assert!(!options.case_insensitive_patterns);
        assert_eq!(options.title_scan_tokens, 10);
        assert_eq!(options.body_margin, 1.02);
        assert_eq!(options.grouping, GroupingTolerances::default());
        assert_eq!(options.fallback_title, "Untitled Document");
    }
}
