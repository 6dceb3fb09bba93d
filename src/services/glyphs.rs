//! Marker glyph detection for post titles.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{AppError, Result};

/// Block glyphs used by decorated titles.
pub const BLOCK_GLYPHS: &str = "▅▇█";

/// The narrower two-glyph set.
pub const BAR_GLYPHS: &str = "▇█";

/// Set of marker glyphs, compiled into one character class.
///
/// A title is marked when any glyph of the set occurs anywhere in it. Each
/// glyph is escaped, so `]`, `^` and `-` are matched literally. No Unicode
/// normalization is applied.
#[derive(Debug, Clone)]
pub struct GlyphPattern {
    glyphs: String,
    class: Regex,
}

impl GlyphPattern {
    /// Build a pattern from a non-empty glyph string.
    pub fn new(glyphs: &str) -> Result<Self> {
        if glyphs.is_empty() {
            return Err(AppError::validation("glyph set is empty"));
        }

        let escaped: String = glyphs
            .chars()
            .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
            .collect();
        let class = Regex::new(&format!("[{escaped}]"))
            .map_err(|e| AppError::validation(format!("glyph set '{glyphs}': {e}")))?;

        Ok(Self {
            glyphs: glyphs.to_string(),
            class,
        })
    }

    /// Broad block-character preset.
    pub fn blocks() -> Result<Self> {
        Self::new(BLOCK_GLYPHS)
    }

    /// Narrow two-glyph preset.
    pub fn bars() -> Result<Self> {
        Self::new(BAR_GLYPHS)
    }

    /// Whether the title carries at least one glyph of the set.
    pub fn is_marked(&self, title: &str) -> bool {
        self.class.is_match(title)
    }

    /// The raw glyph set.
    pub fn glyphs(&self) -> &str {
        &self.glyphs
    }
}

impl PartialEq for GlyphPattern {
    fn eq(&self, other: &Self) -> bool {
        self.glyphs == other.glyphs
    }
}

impl Eq for GlyphPattern {}

/// Accepts a preset name (`blocks`, `bars`) or a literal glyph string.
impl FromStr for GlyphPattern {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blocks" => Self::blocks(),
            "bars" => Self::bars(),
            other => Self::new(other),
        }
    }
}

impl fmt::Display for GlyphPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glyphs)
    }
}
