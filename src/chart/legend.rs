//! Textual legend for Pie/Doughnut charts.
//!
//! Charts never draw a legend on their own surface. Circular geometries have no axis
//! to name their categories, so they get this separate label → colour list instead.

use serde::Serialize;

use super::palette::Rgba;
use super::spec::ChartSpec;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
}

/// One entry per label for Pie/Doughnut, in label order; empty for other geometries.
pub fn legend_entries(spec: &ChartSpec) -> Vec<LegendEntry> {
    if !spec.geometry.is_circular() {
        return Vec::new();
    }
    spec.labels
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            spec.style.background.at(i).map(|color| LegendEntry {
                label: label.clone(),
                color,
            })
        })
        .collect()
}

/// Plain-text rendering, one `■ label (#hex)` line per entry.
pub fn format_legend(entries: &[LegendEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("■ {} ({})", e.label, e.color))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::palette::ColorPalette;
    use crate::chart::spec::{SeriesInput, build};
    use crate::chart::types::ChartGeometry;

    #[test]
    fn bar_has_no_text_legend() {
        let labels = vec!["a".to_string()];
        let values = vec![1.0];
        let input = SeriesInput {
            labels: &labels,
            values: &values,
            series_name: "y",
            x_title: "x",
        };
        let spec = build(ChartGeometry::Bar, &input, 0, &ColorPalette::default());
        assert!(legend_entries(&spec).is_empty());
    }

    #[test]
    fn format_lists_each_label() {
        let entries = vec![
            LegendEntry { label: "Jan".into(), color: Rgba::rgb(255, 0, 0) },
            LegendEntry { label: "Feb".into(), color: Rgba::rgb(0, 0, 255) },
        ];
        assert_eq!(format_legend(&entries), "■ Jan (#ff0000)\n■ Feb (#0000ff)");
    }
}
