use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use crate::projection::format_number;

/// Summary statistics for one value series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub sum: f64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute sum, average, min, and max over the full series.
///
/// Returns `None` for an empty series, so callers never see a `NaN` average.
pub fn summarize(values: &[f64]) -> Option<Stats> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let sum = values.iter().copied().sum::<f64>();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(Stats {
        count,
        sum,
        average: sum / count as f64,
        min,
        max,
    })
}

impl Stats {
    /// Header line shown above each chart, e.g. `Sum: 1,250.0 | Avg: 416.67 | Min: 0 | Max: 800`.
    pub fn display_line(&self, locale_tag: &str) -> String {
        let (locale, dec) = map_locale(locale_tag);
        format!(
            "Sum: {} | Avg: {} | Min: {} | Max: {}",
            fmt_fixed(self.sum, 1, locale, dec),
            fmt_fixed(self.average, 2, locale, dec),
            fmt_plain(self.min, locale, dec),
            fmt_plain(self.max, locale, dec),
        )
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// `v` with `prec` decimals and locale thousands grouping (used for axis ticks too).
pub(crate) fn format_fixed(v: f64, prec: usize, locale_tag: &str) -> String {
    let (locale, dec) = map_locale(locale_tag);
    fmt_fixed(v, prec, locale, dec)
}

fn fmt_fixed(v: f64, prec: usize, locale: &Locale, dec: char) -> String {
    let s = format!("{:.*}", prec, v.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), ""));
    group(v, int_part, frac_part, locale, dec)
}

fn fmt_plain(v: f64, locale: &Locale, dec: char) -> String {
    let s = format_number(v.abs());
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s.as_str(), ""));
    group(v, int_part, frac_part, locale, dec)
}

fn group(v: f64, int_part: &str, frac_part: &str, locale: &Locale, dec: char) -> String {
    let grouped = match int_part.parse::<u64>() {
        Ok(n) => n.to_formatted_string(locale),
        // Exponent notation or out-of-range: leave as is.
        Err(_) => int_part.to_string(),
    };
    let sign = if v < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{dec}{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_line_uses_locale_separators() {
        let s = summarize(&[1000.0, 250.5, -4.0]).unwrap();
        assert_eq!(
            s.display_line("en"),
            "Sum: 1,246.5 | Avg: 415.50 | Min: -4 | Max: 1,000"
        );
        assert_eq!(
            s.display_line("de"),
            "Sum: 1.246,5 | Avg: 415,50 | Min: -4 | Max: 1.000"
        );
    }
}
