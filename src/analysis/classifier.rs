//! Heading classification for single tokens.
//!
//! Combines the font level from a [`FontHierarchy`] with textual heading
//! patterns and a shape test on the token text.

use regex::{Regex, RegexBuilder};

use crate::model::{HeadingLevel, TextToken};

use super::{FontHierarchy, OutlineOptions};

/// Heading-shape patterns, tried in order against the trimmed text.
pub const HEADING_PATTERNS: &[(&str, &str)] = &[
    ("chapter", r"^(Chapter\s+\d+|CHAPTER\s+\d+)"),
    ("numbered-section", r"^(\d+\.(\d+\.)*\d*\s+[A-Z])"),
    ("all-caps", r"^([A-Z][A-Z\s]{8,}$)"),
    ("title-phrase", r"^([A-Z][a-z]+(\s+[A-Z][a-z]+)*):?\s*$"),
    ("appendix", r"^(Appendix\s+[A-Z]:?)"),
    ("roman-numeral", r"^([IVX]+\.\s+[A-Z])"),
];

const MIN_HEADING_CHARS: usize = 3;
const MAX_HEADING_CHARS: usize = 200;
const MAX_SHAPE_WORDS: usize = 15;

const MIN_STRICT_CHARS: usize = 5;
const MAX_STRICT_CHARS: usize = 150;
const MAX_SPECIAL_RATIO: f32 = 0.3;
const PLAIN_PUNCTUATION: &[char] = &[' ', '-', '.', ',', ':', '(', ')'];

struct HeadingPattern {
    name: &'static str,
    regex: Regex,
}

/// Decides whether a token is a heading, and at what level.
pub struct HeadingClassifier {
    patterns: Vec<HeadingPattern>,
    numbered: Regex,
    body_margin: f32,
}

impl HeadingClassifier {
    /// Create a classifier from options.
    pub fn new(options: &OutlineOptions) -> Self {
        let patterns = HEADING_PATTERNS
            .iter()
            .map(|&(name, pattern)| HeadingPattern {
                name,
                regex: RegexBuilder::new(pattern)
                    .case_insensitive(options.case_insensitive_patterns)
                    .build()
                    .expect("heading pattern is valid"),
            })
            .collect();

        Self {
            patterns,
            numbered: Regex::new(r"^\d+\.").expect("numbered prefix pattern is valid"),
            body_margin: options.body_margin,
        }
    }

    /// Classify a token against a hierarchy.
    ///
    /// Returns `None` for non-headings; never returns `Some(Body)`.
    pub fn classify(&self, token: &TextToken, hierarchy: &FontHierarchy) -> Option<HeadingLevel> {
        let text = token.trimmed();
        let len = text.chars().count();
        if !(MIN_HEADING_CHARS..=MAX_HEADING_CHARS).contains(&len) {
            return None;
        }

        let font_level = hierarchy.level_of(&token.signature());
        if font_level == HeadingLevel::Body
            && token.size <= hierarchy.body_size() * self.body_margin
        {
            return None;
        }

        if self.matching_pattern(text).is_some() {
            return Some(if font_level.is_heading() {
                font_level
            } else {
                HeadingLevel::H1
            });
        }

        if font_level.is_heading() && self.looks_like_heading(text) {
            return Some(font_level);
        }

        None
    }

    /// Name of the first heading pattern the text matches.
    pub fn matching_pattern(&self, text: &str) -> Option<&'static str> {
        self.patterns
            .iter()
            .find(|p| p.regex.is_match(text))
            .map(|p| p.name)
    }

    /// Shape test applied when no pattern matched.
    pub fn looks_like_heading(&self, text: &str) -> bool {
        if is_title_case(text) || is_upper_case(text) {
            return true;
        }
        if starts_uppercase(text) && text.split_whitespace().count() <= MAX_SHAPE_WORDS {
            return true;
        }
        self.numbered.is_match(text)
    }
}

/// Standalone test for headings only one provider vouches for.
///
/// The text must start with an uppercase letter, be 5 to 150 characters long,
/// and at most 30% of its characters may be something other than
/// alphanumerics and plain punctuation.
pub fn passes_strict_test(text: &str) -> bool {
    let text = text.trim();
    if !starts_uppercase(text) {
        return false;
    }

    let len = text.chars().count();
    if !(MIN_STRICT_CHARS..=MAX_STRICT_CHARS).contains(&len) {
        return false;
    }

    let special = text
        .chars()
        .filter(|c| !c.is_alphanumeric() && !PLAIN_PUNCTUATION.contains(c))
        .count();
    special as f32 <= len as f32 * MAX_SPECIAL_RATIO
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// At least one cased character and no lowercase ones.
fn is_upper_case(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Every cased run starts with an uppercase letter followed only by lowercase ones.
fn is_title_case(text: &str) -> bool {
    let mut prev_cased = false;
    let mut any_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else {
            prev_cased = false;
        }
    }
    any_cased
}
