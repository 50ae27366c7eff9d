//! Chart specifications: everything needed to draw one geometry, built fresh on every recompute.

use serde::Serialize;

use super::palette::{ColorPalette, Rgba};
use super::types::ChartGeometry;

/// Border colour for Pie/Doughnut slices, outside the fill palette.
pub const NEUTRAL_BORDER: Rgba = Rgba::rgb(0x1f, 0x1f, 0x1f);
/// Alpha byte of the translucent Line background.
pub const LINE_FILL_ALPHA: u8 = 0x33;
/// Curve tension for Line geometry (0 = straight segments).
pub const LINE_TENSION: f64 = 0.4;

/// Series fill: one colour, or one colour per data point (Pie/Doughnut).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Background {
    Series(Rgba),
    PerPoint(Vec<Rgba>),
}

impl Background {
    /// Fill for data point `idx`; per-point lists repeat past their end.
    pub fn at(&self, idx: usize) -> Option<Rgba> {
        match self {
            Background::Series(c) => Some(*c),
            Background::PerPoint(cs) if cs.is_empty() => None,
            Background::PerPoint(cs) => Some(cs[idx % cs.len()]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointStyle {
    pub background: Rgba,
    pub radius: u32,
    pub hover_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStyle {
    pub border_color: Rgba,
    pub background: Background,
    pub border_width: f64,
    /// Fill the area under/inside the series.
    pub fill: bool,
    pub tension: f64,
    pub point: PointStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontSpec {
    pub size: u32,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub title: String,
    pub title_color: Rgba,
    pub title_font: FontSpec,
    pub tick_color: Rgba,
    /// Tick label rotation in degrees.
    pub tick_rotation: u16,
    pub begin_at_zero: bool,
    pub grid_color: Rgba,
    /// Dash pattern `[on, off]` in pixels.
    pub grid_dash: [u32; 2],
}

/// Cartesian (or radial, for Radar) scale options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleConfig {
    pub x: AxisConfig,
    pub y: AxisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    pub enabled: bool,
    pub background: Rgba,
    pub title_color: Rgba,
    pub body_color: Rgba,
    pub border_color: Rgba,
    pub border_width: u32,
    pub title_font: FontSpec,
    pub body_font: FontSpec,
    pub padding: u32,
    pub corner_radius: u32,
    pub display_colors: bool,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            background: Rgba::rgb(0x11, 0x11, 0x11),
            title_color: Rgba::rgb(0xff, 0xff, 0xff),
            body_color: Rgba::rgb(0xcc, 0xcc, 0xcc),
            border_color: Rgba::rgb(0x44, 0x44, 0x44),
            border_width: 1,
            title_font: FontSpec { size: 14, weight: 700 },
            body_font: FontSpec { size: 13, weight: 400 },
            padding: 10,
            corner_radius: 6,
            display_colors: false,
        }
    }
}

/// Fully populated configuration for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub geometry: ChartGeometry,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub series_name: String,
    pub style: SeriesStyle,
    /// `None` for Pie/Doughnut.
    pub scales: Option<ScaleConfig>,
    /// Legend drawn on the chart surface itself. Always off; see [`super::legend`].
    pub show_legend: bool,
    pub tooltip: TooltipStyle,
}

/// Series data shared by every geometry of one recompute.
#[derive(Debug, Clone, Copy)]
pub struct SeriesInput<'a> {
    pub labels: &'a [String],
    pub values: &'a [f64],
    /// Y column name; also the y-axis title.
    pub series_name: &'a str,
    /// X column name, used as the x-axis title.
    pub x_title: &'a str,
}

/// Build the chart spec for `geometry`, coloured by `color_slot`.
pub fn build(
    geometry: ChartGeometry,
    input: &SeriesInput<'_>,
    color_slot: usize,
    palette: &ColorPalette,
) -> ChartSpec {
    let color = palette.color(color_slot);

    let style = if geometry.is_circular() {
        SeriesStyle {
            border_color: NEUTRAL_BORDER,
            background: Background::PerPoint(palette.cycle(input.labels.len())),
            border_width: 1.5,
            fill: true,
            tension: 0.0,
            point: default_point(),
        }
    } else if geometry == ChartGeometry::Line {
        SeriesStyle {
            border_color: color,
            background: Background::Series(color.with_alpha(LINE_FILL_ALPHA)),
            border_width: 2.0,
            fill: false,
            tension: LINE_TENSION,
            point: default_point(),
        }
    } else {
        SeriesStyle {
            border_color: color,
            background: Background::Series(color),
            border_width: 2.0,
            fill: true,
            tension: 0.0,
            point: default_point(),
        }
    };

    let scales = if geometry.is_circular() {
        None
    } else {
        Some(ScaleConfig {
            x: axis(input.x_title, 45, false),
            y: axis(input.series_name, 0, true),
        })
    };

    ChartSpec {
        geometry,
        labels: input.labels.to_vec(),
        values: input.values.to_vec(),
        series_name: input.series_name.to_string(),
        style,
        scales,
        show_legend: false,
        tooltip: TooltipStyle::default(),
    }
}

fn default_point() -> PointStyle {
    PointStyle {
        background: Rgba::rgb(0x22, 0x22, 0x22),
        radius: 5,
        hover_radius: 7,
    }
}

fn axis(title: &str, tick_rotation: u16, begin_at_zero: bool) -> AxisConfig {
    AxisConfig {
        title: title.to_string(),
        title_color: Rgba::rgb(0xdd, 0xdd, 0xdd),
        title_font: FontSpec { size: 14, weight: 500 },
        tick_color: Rgba::rgb(0xaa, 0xaa, 0xaa),
        tick_rotation,
        begin_at_zero,
        grid_color: Rgba::new(255, 255, 255, 13),
        grid_dash: [4, 4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(labels: &'a [String], values: &'a [f64]) -> SeriesInput<'a> {
        SeriesInput {
            labels,
            values,
            series_name: "Sales",
            x_title: "Month",
        }
    }

    #[test]
    fn line_is_translucent_and_smoothed() {
        let labels = vec!["a".to_string(), "b".to_string()];
        let values = vec![1.0, 2.0];
        let palette = ColorPalette::default();
        let spec = build(ChartGeometry::Line, &input(&labels, &values), 0, &palette);
        assert_eq!(spec.style.border_color, palette.color(0));
        assert_eq!(
            spec.style.background,
            Background::Series(palette.color(0).with_alpha(0x33))
        );
        assert!(!spec.style.fill);
        assert_eq!(spec.style.tension, LINE_TENSION);
        assert!(!spec.show_legend);
    }

    #[test]
    fn scales_follow_geometry() {
        let labels = vec!["a".to_string()];
        let values = vec![1.0];
        let palette = ColorPalette::default();
        for g in ChartGeometry::ALL {
            let spec = build(g, &input(&labels, &values), 1, &palette);
            match spec.scales {
                None => assert!(g.is_circular()),
                Some(s) => {
                    assert_eq!(s.x.title, "Month");
                    assert_eq!(s.y.title, "Sales");
                    assert!(s.y.begin_at_zero);
                }
            }
        }
    }
}
