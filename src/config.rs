//! Rendering configuration. Built once and handed to a session; never mutated afterwards.

use crate::chart::palette::{ColorPalette, Rgba};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Default surface width in pixels.
    pub width: u32,
    /// Default surface height in pixels.
    pub height: u32,
    pub palette: ColorPalette,
    /// Surface fill behind every chart.
    pub background: Rgba,
    /// Locale tag for tick and stats formatting (see [`crate::stats::map_locale`]).
    pub locale: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            palette: ColorPalette::default(),
            background: Rgba::rgb(0, 0, 0),
            locale: "en".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_palette(mut self, palette: ColorPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}
