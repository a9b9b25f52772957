//! Color codes, palettes and the extractor that pulls them out of free text

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::StyleError;

static COLOR_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9A-Fa-f]{6}").expect("color code pattern is valid"));

static RGB_FUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)\s*$")
        .expect("rgb pattern is valid")
});

static SEASON_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)season\s*:\s*([a-z]+)").expect("season pattern is valid"));

/// A `#RRGGBB` color, exactly 7 characters.
///
/// Input casing is preserved; use [`ColorCode::canonical`] for comparisons
/// that should ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorCode(String);

impl ColorCode {
    /// Parse a `#RRGGBB` string (surrounding whitespace is ignored)
    pub fn parse(input: &str) -> Result<Self, StyleError> {
        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(StyleError::InvalidInput(format!(
                "Invalid color code: '{}'",
                input
            )))
        }
    }

    /// Parse either `#RRGGBB` or a CSS `rgb(r, g, b)` function
    pub fn parse_css(input: &str) -> Result<Self, StyleError> {
        if let Ok(code) = Self::parse(input) {
            return Ok(code);
        }

        let caps = RGB_FUNCTION_PATTERN.captures(input).ok_or_else(|| {
            StyleError::InvalidInput(format!("Invalid color value: '{}'", input))
        })?;

        let mut channels = [0u8; 3];
        for (slot, idx) in channels.iter_mut().zip(1..=3) {
            *slot = caps[idx].parse::<u8>().map_err(|_| {
                StyleError::InvalidInput(format!("Color channel out of range in '{}'", input))
            })?;
        }

        Ok(Self::from_rgb(channels[0], channels[1], channels[2]))
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{:02X}{:02X}{:02X}", r, g, b))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-case form, used for table lookups
    pub fn canonical(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl Display for ColorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for ColorCode {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColorCode {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorCode> for String {
    fn from(code: ColorCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ColorCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered color codes in order of appearance, duplicates preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<ColorCode>);

impl Palette {
    pub fn new(colors: Vec<ColorCode>) -> Self {
        Self(colors)
    }

    /// The color the outfit search is run with
    pub fn primary(&self) -> Option<&ColorCode> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColorCode> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, code: &ColorCode) -> bool {
        self.0.iter().any(|c| c.canonical() == code.canonical())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorCode;
    type IntoIter = std::slice::Iter<'a, ColorCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extract every `#RRGGBB` substring, left to right, non-overlapping.
///
/// Never fails: text without color codes yields an empty palette.
pub fn extract_colors(text: &str) -> Palette {
    Palette(
        COLOR_CODE_PATTERN
            .find_iter(text)
            .map(|m| ColorCode(m.as_str().to_string()))
            .collect(),
    )
}

/// Seasonal color type reported alongside the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Autumn => write!(f, "autumn"),
            Season::Winter => write!(f, "winter"),
        }
    }
}

impl FromStr for Season {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "autumn" | "fall" => Ok(Season::Autumn),
            "winter" => Ok(Season::Winter),
            _ => Err(StyleError::InvalidInput(format!("Invalid season: {}", s))),
        }
    }
}

/// Find the `Season: <name>` marker in recommendation text, if any
pub fn extract_season(text: &str) -> Option<Season> {
    SEASON_PATTERN
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}
