//! Rasterise one [`ChartSpec`] onto an in-memory RGB surface with Plotters.

use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use std::f64::consts::PI;

use super::fonts::ensure_fonts_registered;
use super::palette::Rgba;
use super::smooth::smooth_polyline;
use super::spec::ChartSpec;
use super::text::{estimate_text_width_px, truncate_to_width};
use super::types::ChartGeometry;
use crate::stats::format_fixed;

const MARGIN: u32 = 16;
const TICK_FONT_PX: u32 = 12;
const Y_TICKS: usize = 6;
/// Inner radius of a doughnut, as a fraction of the outer radius.
const DOUGHNUT_CUTOUT: f64 = 0.5;
/// Widest value span the axis code can divide into ticks without overflowing.
const MAX_SPAN: f64 = f64::MAX / 16.0;
const SLICE_LABEL_COLOR: Rgba = Rgba::rgb(0xaa, 0xaa, 0xaa);

/// An RGB pixel buffer that one chart instance draws onto.
#[derive(Debug)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Draw `spec` onto `surface`, replacing whatever was there.
pub fn draw_chart(
    spec: &ChartSpec,
    surface: &mut PixelSurface,
    background: Rgba,
    locale: &str,
) -> Result<()> {
    if surface.width == 0 || surface.height == 0 {
        bail!("surface has zero size");
    }
    if spec.labels.len() != spec.values.len() {
        bail!(
            "label/value length mismatch ({} vs {})",
            spec.labels.len(),
            spec.values.len()
        );
    }
    ensure_fonts_registered();

    let size = (surface.width, surface.height);
    let root = BitMapBackend::with_buffer(&mut surface.pixels, size).into_drawing_area();
    root.fill(&background.to_plotters())
        .map_err(|e| anyhow!("{:?}", e))?;

    match spec.geometry {
        ChartGeometry::Line | ChartGeometry::Bar => draw_cartesian(&root, spec, locale)?,
        ChartGeometry::Pie => draw_slices(&root, spec, 0.0)?,
        ChartGeometry::Doughnut => draw_slices(&root, spec, DOUGHNUT_CUTOUT)?,
        ChartGeometry::Radar => draw_radar(&root, spec, locale)?,
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Value axis bounds for `values`, padded by 5% on the open ends.
///
/// Fails when a value is not finite or the span is too wide to be split into
/// ticks, so such a series never reaches the tick computation in Plotters.
pub(crate) fn value_range(values: &[f64], begin_at_zero: bool) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Ok((0.0, 1.0));
    }
    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        bail!("series contains non-finite values");
    }
    if begin_at_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let span = hi - lo;
    if !(span <= MAX_SPAN) {
        bail!("value range {lo:e}..{hi:e} is too wide to draw");
    }
    if span < f64::EPSILON {
        return Ok((lo, lo + 1.0));
    }
    let pad = span * 0.05;
    let lo = if begin_at_zero && lo == 0.0 { lo } else { lo - pad };
    let hi = if begin_at_zero && hi == 0.0 { hi } else { hi + pad };
    Ok((lo, hi))
}

/// Decimals needed to tell `ticks` ticks over `lo..hi` apart.
fn tick_decimals(lo: f64, hi: f64, ticks: usize) -> usize {
    let step = (hi - lo) / ticks.max(1) as f64;
    if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil().clamp(0.0, 6.0) as usize
    }
}

fn err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn px(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

fn stroke(color: Rgba, width: f64) -> ShapeStyle {
    ShapeStyle {
        color: color.to_plotters(),
        filled: false,
        stroke_width: (width.round() as u32).max(1),
    }
}

fn fill(color: Rgba) -> ShapeStyle {
    ShapeStyle {
        color: color.to_plotters(),
        filled: true,
        stroke_width: 0,
    }
}

fn text_style(font_px: u32, color: Rgba) -> TextStyle<'static> {
    let mut style = TextStyle::from((FontFamily::SansSerif, font_px));
    style.color = color.to_plotters().to_backend_color();
    style
}

/// Line and Bar: categories along x, values on the y axis.
///
/// `area` must be the root area: the smoothed line is drawn in backend pixels.
fn draw_cartesian<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    locale: &str,
) -> Result<()> {
    let n = spec.values.len();
    if n == 0 {
        return Ok(());
    }
    let scales = spec
        .scales
        .as_ref()
        .ok_or_else(|| anyhow!("{} chart without scales", spec.geometry))?;
    let (y_lo, y_hi) = value_range(&spec.values, scales.y.begin_at_zero)?;
    let decimals = tick_decimals(y_lo, y_hi, Y_TICKS);

    let y_label_px = [y_lo, y_hi]
        .iter()
        .map(|v| estimate_text_width_px(&format_fixed(*v, decimals, locale), TICK_FONT_PX))
        .max()
        .unwrap_or(0);
    let left_area = y_label_px + scales.y.title_font.size + 24;
    let bottom_area = TICK_FONT_PX + scales.x.title_font.size + 24;
    let (w, _) = area.dim_in_pixel();
    let plot_w = w.saturating_sub(left_area + 2 * MARGIN).max(1);

    // One label per category when they fit, otherwise the mesh thins them.
    let slot_px = (plot_w / n as u32).max(1);
    let max_label_px = slot_px.max(60);
    let widest = spec
        .labels
        .iter()
        .map(|l| estimate_text_width_px(l, TICK_FONT_PX).min(max_label_px))
        .max()
        .unwrap_or(0);
    let x_label_count = ((plot_w / (widest + 6).max(1)) as usize).clamp(1, n);

    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .x_label_area_size(bottom_area)
        .y_label_area_size(left_area)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_lo..y_hi)
        .map_err(err)?;

    let x_fmt = |x: &f64| {
        let i = x.round();
        if (x - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        spec.labels
            .get(i as usize)
            .map(|l| truncate_to_width(l, TICK_FONT_PX, max_label_px))
            .unwrap_or_default()
    };
    let y_fmt = |v: &f64| format_fixed(*v, decimals, locale);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .max_light_lines(0)
        .bold_line_style(stroke(scales.y.grid_color, 1.0))
        .axis_style(stroke(scales.x.tick_color, 1.0))
        .x_labels(x_label_count)
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .x_label_style(text_style(TICK_FONT_PX, scales.x.tick_color))
        .y_label_style(text_style(TICK_FONT_PX, scales.y.tick_color))
        .x_desc(scales.x.title.clone())
        .y_desc(scales.y.title.clone())
        .axis_desc_style(text_style(scales.y.title_font.size, scales.y.title_color))
        .draw()
        .map_err(err)?;

    let style = &spec.style;
    let base = 0.0_f64.clamp(y_lo, y_hi);
    match spec.geometry {
        ChartGeometry::Bar => {
            let half = 0.8 * 0.9 / 2.0;
            let bar = |i: usize, v: f64| [(i as f64 - half, base), (i as f64 + half, v)];
            chart
                .draw_series(spec.values.iter().enumerate().filter_map(|(i, v)| {
                    style
                        .background
                        .at(i)
                        .map(|c| Rectangle::new(bar(i, *v), fill(c)))
                }))
                .map_err(err)?;
            chart
                .draw_series(spec.values.iter().enumerate().map(|(i, v)| {
                    Rectangle::new(bar(i, *v), stroke(style.border_color, style.border_width))
                }))
                .map_err(err)?;
        }
        _ => {
            let to_px = |x: f64, y: f64| {
                let (px_x, px_y) = chart.backend_coord(&(x, y));
                (px_x as f64, px_y as f64)
            };
            let points: Vec<(f64, f64)> = spec
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| to_px(i as f64, *v))
                .collect();
            let y_bounds = (to_px(0.0, y_hi).1, to_px(0.0, y_lo).1);
            let curve = smooth_polyline(&points, style.tension, y_bounds);
            if style.fill {
                if let Some(c) = style.background.at(0) {
                    let base_y = to_px(0.0, base).1;
                    let mut poly: Vec<(i32, i32)> = curve.iter().copied().map(px).collect();
                    poly.push(px((points[n - 1].0, base_y)));
                    poly.push(px((points[0].0, base_y)));
                    area.draw(&Polygon::new(poly, fill(c))).map_err(err)?;
                }
            }
            if curve.len() > 1 {
                let path: Vec<(i32, i32)> = curve.into_iter().map(px).collect();
                area.draw(&PathElement::new(
                    path,
                    stroke(style.border_color, style.border_width),
                ))
                .map_err(err)?;
            }
            let r = style.point.radius as i32;
            chart
                .draw_series(spec.values.iter().enumerate().map(|(i, v)| {
                    Circle::new((i as f64, *v), r, fill(style.point.background))
                }))
                .map_err(err)?;
            chart
                .draw_series(spec.values.iter().enumerate().map(|(i, v)| {
                    Circle::new((i as f64, *v), r, stroke(style.border_color, 1.0))
                }))
                .map_err(err)?;
        }
    }
    Ok(())
}

/// Pie (`cutout == 0`) and Doughnut: one slice per value, proportional to `|value|`.
fn draw_slices<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    cutout: f64,
) -> Result<()> {
    let peak = spec.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    if !peak.is_finite() {
        bail!("series contains non-finite values");
    }
    if peak <= 0.0 {
        return Ok(());
    }
    // Sizes relative to the largest slice keep the total finite.
    let sizes: Vec<f64> = spec.values.iter().map(|v| v.abs() / peak).collect();
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| {
            let c = spec.style.background.at(i).unwrap_or(spec.style.border_color);
            RGBColor(c.r, c.g, c.b)
        })
        .collect();
    let labels: Vec<String> = spec
        .labels
        .iter()
        .map(|l| truncate_to_width(l, TICK_FONT_PX, 120))
        .collect();

    let (w, h) = area.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = (w.min(h) as f64 / 2.0 - (MARGIN + 2 * TICK_FONT_PX) as f64).max(1.0);

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(text_style(TICK_FONT_PX, SLICE_LABEL_COLOR));
    pie.label_offset(6.0);
    if cutout > 0.0 {
        pie.donut_hole(radius * cutout);
    }
    area.draw(&pie).map_err(err)?;

    // Borders between slices.
    let total: f64 = sizes.iter().sum();
    let border = stroke(spec.style.border_color, spec.style.border_width);
    let inner = radius * cutout;
    let mut angle = -PI / 2.0;
    for size in &sizes {
        let at = |r: f64| {
            px((
                center.0 as f64 + r * angle.cos(),
                center.1 as f64 + r * angle.sin(),
            ))
        };
        area.draw(&PathElement::new(vec![at(inner), at(radius)], border))
            .map_err(err)?;
        angle += size / total * 2.0 * PI;
    }
    Ok(())
}

/// Radar: one spoke per label, values on a radial scale.
fn draw_radar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
    locale: &str,
) -> Result<()> {
    let n = spec.values.len();
    if n == 0 {
        return Ok(());
    }
    let scales = spec
        .scales
        .as_ref()
        .ok_or_else(|| anyhow!("radar chart without scales"))?;
    let (lo, hi) = value_range(&spec.values, scales.y.begin_at_zero)?;
    let axis = RangedCoordf64::from(lo..hi);
    let rings: Vec<f64> = axis.key_points(5).into_iter().filter(|t| *t > lo).collect();
    let decimals = tick_decimals(lo, hi, 5);

    let (w, h) = area.dim_in_pixel();
    let center = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = (w.min(h) as f64 / 2.0 - (MARGIN + 28) as f64).max(1.0);
    let fraction = |v: f64| ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    let angle = |i: usize| -PI / 2.0 + 2.0 * PI * i as f64 / n as f64;
    let at = |i: usize, r: f64| (center.0 + r * angle(i).cos(), center.1 + r * angle(i).sin());
    let grid = stroke(scales.y.grid_color, 1.0);

    for t in &rings {
        let r = fraction(*t) * radius;
        let mut ring: Vec<(i32, i32)> = (0..n).map(|i| px(at(i, r))).collect();
        ring.push(px(at(0, r)));
        area.draw(&PathElement::new(ring, grid)).map_err(err)?;
    }
    for i in 0..n {
        area.draw(&PathElement::new(vec![px(center), px(at(i, radius))], grid))
            .map_err(err)?;
    }

    let style = &spec.style;
    let shape: Vec<(i32, i32)> = spec
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| px(at(i, fraction(*v) * radius)))
        .collect();
    if style.fill {
        if let Some(c) = style.background.at(0) {
            area.draw(&Polygon::new(shape.clone(), fill(c))).map_err(err)?;
        }
    }
    let mut outline = shape.clone();
    outline.push(shape[0]);
    area.draw(&PathElement::new(
        outline,
        stroke(style.border_color, style.border_width),
    ))
    .map_err(err)?;
    let r = style.point.radius as i32;
    for p in &shape {
        area.draw(&Circle::new(*p, r, fill(style.point.background)))
            .map_err(err)?;
    }

    let label_style = text_style(TICK_FONT_PX, scales.x.tick_color)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let max_px = (2.0 * PI * radius / n as f64).clamp(40.0, 140.0) as u32;
    for (i, l) in spec.labels.iter().enumerate() {
        let s = truncate_to_width(l, TICK_FONT_PX, max_px);
        area.draw(&Text::new(s, px(at(i, radius + 16.0)), label_style.clone()))
            .map_err(err)?;
    }
    let tick_style = text_style(TICK_FONT_PX, scales.y.tick_color)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for t in &rings {
        let (x, y) = px(at(0, fraction(*t) * radius));
        let s = format_fixed(*t, decimals, locale);
        area.draw(&Text::new(s, (x + 4, y), tick_style.clone()))
            .map_err(err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::palette::ColorPalette;
    use crate::chart::spec::{SeriesInput, build};

    fn spec(g: ChartGeometry, values: &[f64]) -> ChartSpec {
        let labels: Vec<String> = (0..values.len()).map(|i| format!("#{}", i + 1)).collect();
        let input = SeriesInput {
            labels: &labels,
            values,
            series_name: "y",
            x_title: "x",
        };
        build(g, &input, 0, &ColorPalette::default())
    }

    fn draw(g: ChartGeometry, values: &[f64]) -> (Result<()>, PixelSurface) {
        let mut surface = PixelSurface::new(320, 240);
        let res = draw_chart(&spec(g, values), &mut surface, Rgba::rgb(0, 0, 0), "en");
        (res, surface)
    }

    #[test]
    fn value_range_includes_zero_when_asked() {
        let (lo, hi) = value_range(&[10.0, 0.0, 20.0], true).unwrap();
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);
        let (lo, hi) = value_range(&[-5.0, 3.0], true).unwrap();
        assert!(lo < -5.0 && hi > 3.0);
    }

    #[test]
    fn flat_series_gets_a_unit_range() {
        assert_eq!(value_range(&[0.0, 0.0], true).unwrap(), (0.0, 1.0));
        assert_eq!(value_range(&[7.0], false).unwrap(), (7.0, 8.0));
    }

    #[test]
    fn extreme_spans_are_rejected() {
        assert!(value_range(&[1.7e308, 1.0], true).is_err());
        assert!(value_range(&[f64::MAX, -f64::MAX], false).is_err());
        assert!(value_range(&[f64::INFINITY], false).is_err());
        assert!(value_range(&[1e300, -1e300], true).is_ok());
    }

    #[test]
    fn every_geometry_draws_something() {
        for g in ChartGeometry::ALL {
            let (res, surface) = draw(g, &[10.0, 0.0, 20.0]);
            res.unwrap();
            assert!(
                surface.pixels().iter().any(|b| *b != 0),
                "{g} left the surface blank"
            );
        }
    }

    #[test]
    fn huge_cartesian_values_fail_without_panicking() {
        for g in [ChartGeometry::Line, ChartGeometry::Bar, ChartGeometry::Radar] {
            let (res, _) = draw(g, &[1.7e308, 1.0]);
            assert!(res.is_err(), "{g} accepted an undrawable range");
        }
    }

    #[test]
    fn slices_of_maximal_values_still_draw() {
        for g in [ChartGeometry::Pie, ChartGeometry::Doughnut] {
            let (res, surface) = draw(g, &[f64::MAX, f64::MAX]);
            res.unwrap();
            assert!(
                surface.pixels().iter().any(|b| *b != 0),
                "{g} left the surface blank"
            );
        }
    }

    #[test]
    fn all_zero_pie_is_background_only() {
        let (res, surface) = draw(ChartGeometry::Pie, &[0.0, 0.0]);
        res.unwrap();
        assert!(surface.pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn zero_sized_surface_is_an_error() {
        let mut surface = PixelSurface::new(0, 10);
        let bar = spec(ChartGeometry::Bar, &[1.0]);
        assert!(draw_chart(&bar, &mut surface, Rgba::rgb(0, 0, 0), "en").is_err());
    }

    #[test]
    fn doughnut_leaves_its_centre_empty() {
        let (_, pie) = draw(ChartGeometry::Pie, &[1.0, 2.0, 3.0]);
        let (_, doughnut) = draw(ChartGeometry::Doughnut, &[1.0, 2.0, 3.0]);
        let centre = (120 * 320 + 160) * 3;
        assert!(pie.pixels()[centre..centre + 3].iter().any(|b| *b != 0));
        assert!(doughnut.pixels()[centre..centre + 3].iter().all(|b| *b == 0));
    }

    #[test]
    fn tick_decimals_follow_the_step() {
        assert_eq!(tick_decimals(0.0, 600.0, 6), 0);
        assert_eq!(tick_decimals(0.0, 0.03, 6), 3);
    }
}
