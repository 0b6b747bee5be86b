//! Document title selection.

use crate::model::DocumentLayout;

use super::OutlineOptions;

const MIN_TITLE_CHARS: usize = 10;
const MAX_TITLE_CHARS: usize = 200;

/// Picks the most prominent early line of the first page as the title.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    scan_tokens: usize,
    min_size: f32,
    fallback: String,
}

impl TitleExtractor {
    /// Create an extractor from options.
    pub fn new(options: &OutlineOptions) -> Self {
        Self {
            scan_tokens: options.title_scan_tokens,
            min_size: options.title_min_size,
            fallback: options.fallback_title.clone(),
        }
    }

    /// Select the title from the first pages of the given layouts.
    ///
    /// Only the leading tokens of each first page are considered. Among those
    /// of suitable length and size, the largest wins; earlier candidates win
    /// ties, and layouts are searched in the order given.
    pub fn extract<'a>(&self, layouts: impl IntoIterator<Item = &'a DocumentLayout>) -> String {
        let mut best: Option<(&str, f32)> = None;

        for layout in layouts {
            for token in layout.first_page().iter().take(self.scan_tokens) {
                let text = token.trimmed();
                let len = text.chars().count();
                if !(MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&len) || token.size < self.min_size
                {
                    continue;
                }
                if best.map_or(true, |(_, size)| token.size > size) {
                    best = Some((text, token.size));
                }
            }
        }

        match best {
            Some((text, _)) => text.split_whitespace().collect::<Vec<_>>().join(" "),
            None => self.fallback.clone(),
        }
    }
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self::new(&OutlineOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, TextToken};

    fn layout(tokens: &[(&str, f32)]) -> DocumentLayout {
        let page = tokens
            .iter()
            .map(|(text, size)| {
                TextToken::new(*text, "Times", *size, false, 1, BoundingBox::default())
            })
            .collect();
        DocumentLayout::new("test", vec![page])
    }

    #[test]
    fn test_largest_qualifying_token_wins() {
        let l = layout(&[
            ("Company Confidential", 12.0),
            ("Quarterly", 12.0),
            ("Annual Report 2024", 18.0),
            ("Prepared by the finance team", 12.0),
        ]);
        assert_eq!(TitleExtractor::default().extract([&l]), "Annual Report 2024");
    }

    #[test]
    fn test_fallback_when_nothing_large() {
        let l = layout(&[("Company Confidential", 12.0), ("Annual Report 2024", 13.9)]);
        assert_eq!(TitleExtractor::default().extract([&l]), "Untitled Document");
        assert_eq!(
            TitleExtractor::default().extract(Vec::<&DocumentLayout>::new()),
            "Untitled Document"
        );
    }

    #[test]
    fn test_length_bounds_and_scan_depth() {
        let mut tokens: Vec<(&str, f32)> = vec![("Short", 30.0)];
        tokens.extend(std::iter::repeat(("filler text here", 10.0)).take(9));
        tokens.push(("Too Late For Title", 40.0));
        let l = layout(&tokens);
        assert_eq!(TitleExtractor::default().extract([&l]), "Untitled Document");
    }

    #[test]
    fn test_tie_keeps_first_and_collapses_whitespace() {
        let a = layout(&[("Design   Guide\tVolume 1", 20.0)]);
        let b = layout(&[("Design Guide Volume 2", 20.0)]);
        assert_eq!(
            TitleExtractor::default().extract([&a, &b]),
            "Design Guide Volume 1"
        );
    }

    #[test]
    fn test_second_layout_can_win() {
        let a = layout(&[("Design Guide Draft", 16.0)]);
        let b = layout(&[("Design Guide Final", 22.0)]);
        assert_eq!(TitleExtractor::default().extract([&a, &b]), "Design Guide Final");
    }

    #[test]
    fn test_custom_fallback() {
        let options = OutlineOptions::new().with_fallback_title("No Title");
        let extractor = TitleExtractor::new(&options);
        assert_eq!(extractor.extract(Vec::<&DocumentLayout>::new()), "No Title");
    }
}
