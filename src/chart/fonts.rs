//! Font registration for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so DejaVu Sans is embedded and
//! registered as "sans-serif" once per process.

use log::warn;
use plotters::style::FontStyle;
use std::sync::Once;

static INIT_FONTS: Once = Once::new();

pub(crate) fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let font = include_bytes!("../../assets/DejaVuSans.ttf");
        if plotters::style::register_font("sans-serif", FontStyle::Normal, font).is_err() {
            warn!("embedded chart font could not be registered");
        }
    });
}
