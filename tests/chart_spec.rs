use sheetviz::chart::spec::{Background, LINE_FILL_ALPHA, NEUTRAL_BORDER, SeriesInput, build};
use sheetviz::chart::{ChartGeometry, ColorPalette, Rgba, format_legend, legend_entries};

fn input<'a>(labels: &'a [String], values: &'a [f64]) -> SeriesInput<'a> {
    SeriesInput {
        labels,
        values,
        series_name: "Sales",
        x_title: "Month",
    }
}

fn labels(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("L{i}")).collect()
}

#[test]
fn pie_gets_one_colour_per_point_cycling_the_palette() {
    let palette = ColorPalette::default();
    let l = labels(12);
    let v = vec![1.0; 12];
    let spec = build(ChartGeometry::Pie, &input(&l, &v), 0, &palette);
    let Background::PerPoint(colors) = &spec.style.background else {
        panic!("pie must colour per point");
    };
    assert_eq!(colors.len(), 12);
    for i in 0..palette.len() {
        for j in (i + 1)..palette.len() {
            assert_ne!(colors[i], colors[j]);
        }
    }
    assert_eq!(colors[10], colors[0]);
    assert_eq!(colors[11], colors[1]);
    assert_eq!(spec.style.border_color, NEUTRAL_BORDER);
    assert!(spec.scales.is_none());
}

#[test]
fn line_is_translucent_unfilled_and_smoothed() {
    let palette = ColorPalette::default();
    let l = labels(3);
    let v = vec![1.0, 2.0, 3.0];
    let spec = build(ChartGeometry::Line, &input(&l, &v), 0, &palette);
    assert!(!spec.style.fill);
    assert!(spec.style.tension > 0.0);
    assert_eq!(
        spec.style.background,
        Background::Series(palette.color(0).with_alpha(LINE_FILL_ALPHA))
    );
}

#[test]
fn cartesian_axes_are_titled_by_columns() {
    let l = labels(2);
    let v = vec![5.0, 6.0];
    let spec = build(ChartGeometry::Bar, &input(&l, &v), 1, &ColorPalette::default());
    let scales = spec.scales.expect("bar has axes");
    assert_eq!(scales.x.title, "Month");
    assert_eq!(scales.y.title, "Sales");
    assert!(scales.y.begin_at_zero);
    assert!(!spec.show_legend);
    assert_eq!(spec.labels, l);
    assert_eq!(spec.values, v);
}

#[test]
fn custom_palette_drives_colour_slots() {
    let palette = ColorPalette::parse_list("#000000, #ffffff").unwrap();
    let l = labels(1);
    let v = vec![1.0];
    let spec = build(ChartGeometry::Radar, &input(&l, &v), 3, &palette);
    assert_eq!(spec.style.border_color, Rgba::rgb(255, 255, 255));
}

#[test]
fn doughnut_legend_lists_every_label() {
    let l = vec!["North".to_string(), "South".to_string()];
    let v = vec![3.0, 4.0];
    let spec = build(ChartGeometry::Doughnut, &input(&l, &v), 0, &ColorPalette::default());
    let text = format_legend(&legend_entries(&spec));
    assert_eq!(text, "■ North (#ff6384)\n■ South (#36a2eb)");
}

#[test]
fn spec_serializes_to_json() {
    let l = labels(2);
    let v = vec![1.0, 2.0];
    let spec = build(ChartGeometry::Line, &input(&l, &v), 0, &ColorPalette::default());
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["seriesName"], "Sales");
    assert_eq!(json["showLegend"], false);
}
