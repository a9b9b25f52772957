//! Color meanings shown next to palette swatches

use super::color::ColorCode;

pub const SWATCH_FALLBACK: &str = "Discover the meaning of this color.";
pub const INSIGHT_FALLBACK: &str =
    "Explore the unique qualities of this color in your style journey.";

const COLOR_MEANINGS: [(&str, &str); 5] = [
    (
        "#FF5733",
        "Orange represents creativity, enthusiasm, and adventure.",
    ),
    (
        "#33FF57",
        "Green symbolizes growth, harmony, balance, and nature.",
    ),
    (
        "#3357FF",
        "Blue conveys tranquility, stability, trust, and confidence.",
    ),
    (
        "#FF33F1",
        "Pink signifies love, femininity, compassion, and nurturing.",
    ),
    (
        "#FFFF33",
        "Yellow embodies optimism, clarity, warmth, and energy.",
    ),
];

/// Fixed lookup from color code to meaning. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteResolver;

impl PaletteResolver {
    /// Meaning from the table, if the code is known (case-insensitive)
    pub fn lookup(code: &ColorCode) -> Option<&'static str> {
        let canonical = code.canonical();
        COLOR_MEANINGS
            .iter()
            .find(|(known, _)| *known == canonical)
            .map(|(_, meaning)| *meaning)
    }

    /// Text for a palette swatch. Total over all color codes.
    pub fn meaning(code: &ColorCode) -> &'static str {
        Self::lookup(code).unwrap_or(SWATCH_FALLBACK)
    }

    /// Text for the color-detail view
    pub fn insight(code: &ColorCode) -> &'static str {
        Self::lookup(code).unwrap_or(INSIGHT_FALLBACK)
    }
}
