//! Font hierarchy inference.
//!
//! Maps every distinct font signature of a layout to a heading level, using
//! the size distribution of all token occurrences and the body text size.

use std::collections::HashMap;

use crate::model::{FontSignature, HeadingLevel};

/// Size percentiles the level rules are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizePercentiles {
    /// 95th percentile
    pub p95: f32,
    /// 85th percentile
    pub p85: f32,
    /// 75th percentile
    pub p75: f32,
    /// 65th percentile
    pub p65: f32,
}

impl SizePercentiles {
    /// Compute percentiles over a list of sizes (any order).
    pub fn from_sizes(sizes: &[f32]) -> Option<Self> {
        if sizes.is_empty() {
            return None;
        }
        let mut sorted = sizes.to_vec();
        sorted.sort_by(f32::total_cmp);
        Some(Self {
            p95: percentile(&sorted, 95.0),
            p85: percentile(&sorted, 85.0),
            p75: percentile(&sorted, 75.0),
            p65: percentile(&sorted, 65.0),
        })
    }
}

/// Percentile of sorted values with linear interpolation between closest ranks.
pub fn percentile(sorted: &[f32], p: f32) -> f32 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let rank = p / 100.0 * (n - 1) as f32;
            let lo = rank.floor() as usize;
            let hi = (rank.ceil() as usize).min(n - 1);
            let frac = rank - lo as f32;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// What a level rule looks at.
struct RuleInput {
    size: f32,
    bold: bool,
    body_size: f32,
    pct: SizePercentiles,
}

/// One row of the level table.
struct LevelRule {
    level: HeadingLevel,
    applies: fn(&RuleInput) -> bool,
}

fn is_h1(i: &RuleInput) -> bool {
    i.size >= i.pct.p95
}

fn is_h2(i: &RuleInput) -> bool {
    i.size >= i.pct.p85 || (i.bold && i.size >= i.body_size * 1.1)
}

fn is_h3(i: &RuleInput) -> bool {
    i.size >= i.pct.p75 || (i.bold && i.size >= i.body_size)
}

fn is_h4(i: &RuleInput) -> bool {
    i.size >= i.pct.p65 || i.bold
}

/// Evaluated top-down; first match wins, no match means body text.
const LEVEL_RULES: &[LevelRule] = &[
    LevelRule { level: HeadingLevel::H1, applies: is_h1 },
    LevelRule { level: HeadingLevel::H2, applies: is_h2 },
    LevelRule { level: HeadingLevel::H3, applies: is_h3 },
    LevelRule { level: HeadingLevel::H4, applies: is_h4 },
];

/// Font signature to heading level mapping for one layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontHierarchy {
    levels: HashMap<FontSignature, HeadingLevel>,
    body_size: f32,
    percentiles: Option<SizePercentiles>,
}

impl FontHierarchy {
    /// Analyze the font multiset of a layout.
    ///
    /// The body size is the size of the most frequent signature; ties go to
    /// the signature seen first. An empty multiset, or one without a single
    /// positive size, yields an empty mapping.
    pub fn analyze(fonts: &[FontSignature]) -> Self {
        let Some(body) = most_frequent(fonts) else {
            return Self::default();
        };
        let body_size = body.size();

        let sizes: Vec<f32> = fonts.iter().map(FontSignature::size).filter(|s| *s > 0.0).collect();
        let Some(pct) = SizePercentiles::from_sizes(&sizes) else {
            return Self {
                levels: HashMap::new(),
                body_size,
                percentiles: None,
            };
        };

        let mut levels = HashMap::new();
        for sig in fonts {
            if levels.contains_key(sig) {
                continue;
            }
            let input = RuleInput {
                size: sig.size(),
                bold: sig.bold,
                body_size,
                pct,
            };
            let level = LEVEL_RULES
                .iter()
                .find(|rule| (rule.applies)(&input))
                .map_or(HeadingLevel::Body, |rule| rule.level);
            levels.insert(sig.clone(), level);
        }

        log::debug!(
            "font hierarchy: body={:.1}, p95={:.1}, p85={:.1}, p75={:.1}, p65={:.1}, {} signatures",
            body_size,
            pct.p95,
            pct.p85,
            pct.p75,
            pct.p65,
            levels.len()
        );

        Self {
            levels,
            body_size,
            percentiles: Some(pct),
        }
    }

    /// Level of a signature; unknown signatures are body text.
    pub fn level_of(&self, signature: &FontSignature) -> HeadingLevel {
        self.levels
            .get(signature)
            .copied()
            .unwrap_or(HeadingLevel::Body)
    }

    /// Body text font size.
    pub fn body_size(&self) -> f32 {
        self.body_size
    }

    /// Percentiles used to build the mapping, if any sizes were valid.
    pub fn percentiles(&self) -> Option<SizePercentiles> {
        self.percentiles
    }

    /// Check if no signature could be classified.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// All entries, largest size first, then by font name and bold flag.
    pub fn entries(&self) -> Vec<(&FontSignature, HeadingLevel)> {
        let mut entries: Vec<_> = self.levels.iter().map(|(s, l)| (s, *l)).collect();
        entries.sort_by(|(a, _), (b, _)| {
            b.size()
                .total_cmp(&a.size())
                .then_with(|| a.font_name.cmp(&b.font_name))
                .then(a.bold.cmp(&b.bold))
        });
        entries
    }
}

fn most_frequent(fonts: &[FontSignature]) -> Option<&FontSignature> {
    let mut counts: HashMap<&FontSignature, usize> = HashMap::new();
    for sig in fonts {
        *counts.entry(sig).or_insert(0) += 1;
    }

    let mut best: Option<(&FontSignature, usize)> = None;
    for sig in fonts {
        let count = counts[sig];
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((sig, count));
        }
    }
    best.map(|(sig, _)| sig)
}
