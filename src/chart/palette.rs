//! Colours: an RGBA value type and the fixed series palette.

use plotters::style::RGBAColor;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PaletteError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same colour with a different alpha byte (`0x33` is the translucent line fill).
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_plotters(self) -> RGBAColor {
        RGBAColor(self.r, self.g, self.b, self.a as f64 / 255.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = PaletteError;

    /// Accepts `#rgb`, `#rrggbb`, and `#rrggbbaa` (leading `#` optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PaletteError::InvalidHex(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Rgba::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }
}

/// Default series palette, in slot order.
const DEFAULT10: [Rgba; 10] = [
    Rgba::rgb(0xff, 0x63, 0x84), // pink
    Rgba::rgb(0x36, 0xa2, 0xeb), // blue
    Rgba::rgb(0xcc, 0x65, 0xfe), // violet
    Rgba::rgb(0xff, 0xce, 0x56), // yellow
    Rgba::rgb(0x4b, 0xc0, 0xc0), // teal
    Rgba::rgb(0xf7, 0x78, 0x25), // orange
    Rgba::rgb(0x8e, 0x44, 0xad), // purple
    Rgba::rgb(0x2e, 0xcc, 0x71), // green
    Rgba::rgb(0x34, 0x98, 0xdb), // light blue
    Rgba::rgb(0xe7, 0x4c, 0x3c), // red
];

/// Fixed, ordered set of series colours. Lookups cycle past the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    colors: Vec<Rgba>,
}

impl ColorPalette {
    pub fn new(colors: Vec<Rgba>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Parse a comma- or semicolon-separated list of hex colours.
    pub fn parse_list(s: &str) -> Result<Self, PaletteError> {
        let colors = s
            .split([',', ';'])
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Rgba>, _>>()?;
        Self::new(colors)
    }

    /// Colour for a slot (or data point) index.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgba {
        self.colors[idx % self.colors.len()]
    }

    /// First `n` colours, repeating with period `len()`.
    pub fn cycle(&self, n: usize) -> Vec<Rgba> {
        (0..n).map(|i| self.color(i)).collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            colors: DEFAULT10.to_vec(),
        }
    }
}
