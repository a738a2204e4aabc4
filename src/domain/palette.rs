// Channel palette domain model
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Colors for channels 1..=24, in channel order.
pub const DEFAULT_CHANNEL_COLORS: [&str; 24] = [
    "rgb(238, 32, 77)",
    "rgb(252, 232, 131)",
    "rgb(31, 117, 254)",
    "rgb(180, 103, 77)",
    "rgb(255, 117, 56)",
    "rgb(28, 172, 120)",
    "rgb(146, 110, 174)",
    "rgb(35, 35, 35)",
    "rgb(255, 170, 204)",
    "rgb(255, 182, 83)",
    "rgb(25, 158, 189)",
    "rgb(192, 68, 143)",
    "rgb(255, 83, 73)",
    "rgb(197, 227, 132)",
    "rgb(115, 102, 189)",
    "rgb(162, 173, 208)",
    "rgb(247, 83, 148)",
    "rgb(253, 219, 109)",
    "rgb(29, 172, 214)",
    "rgb(253, 217, 181)",
    "rgb(252, 40, 71)",
    "rgb(240, 232, 145)",
    "rgb(93, 118, 203)",
    "rgb(149, 145, 140)",
];

/// Smallest palette that still gives every common modem channel its own color.
pub const MIN_PALETTE_LEN: usize = 24;

pub const DEFAULT_UNASSIGNED_COLOR: &str = "rgb(128, 128, 128)";

pub const DEFAULT_LOG_EVENTS_COLOR: &str = "rgba(220, 53, 69, 0.5)";

/// A CSS color string understood by the rendering engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PaletteError {
    #[error("palette has {len} colors, at least {min} are required")]
    TooFew { len: usize, min: usize },
    #[error("color {0} appears more than once in the palette")]
    DuplicateColor(String),
}

/// Immutable, ordered channel palette. Entry `i` belongs to channel `i + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    unassigned: Color,
}

impl Palette {
    pub fn new(colors: Vec<Color>, unassigned: Color) -> Result<Self, PaletteError> {
        if colors.len() < MIN_PALETTE_LEN {
            return Err(PaletteError::TooFew {
                len: colors.len(),
                min: MIN_PALETTE_LEN,
            });
        }

        let mut seen = HashSet::new();
        for color in &colors {
            if !seen.insert(color) {
                return Err(PaletteError::DuplicateColor(color.as_str().to_string()));
            }
        }

        Ok(Self { colors, unassigned })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Color for identifiers that cannot be placed on the palette at all.
    pub fn unassigned(&self) -> &Color {
        &self.unassigned
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_CHANNEL_COLORS.iter().map(|c| Color::new(*c)).collect(),
            unassigned: Color::new(DEFAULT_UNASSIGNED_COLOR),
        }
    }
}
