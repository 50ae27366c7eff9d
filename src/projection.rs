//! Axis projection: turn a dataset plus a column selection into chart labels and values.
//!
//! Projection never fails. An incomplete selection (or an empty dataset) yields an
//! empty [`Projection`], and any Y cell that is not numeric is counted as `0` so that
//! label, value, and row counts always line up.

use crate::models::{AxisMode, AxisSelection, CellValue, Dataset, Projection};

/// Project `dataset` onto (labels, values) according to `selection`.
///
/// - `Normal`: labels from the X column, values from the Y column.
/// - `OnlyY`: labels are `#1, #2, …`, values from the Y column.
/// - `OnlyX`: labels from the X column, values are `1, 2, …`.
///
/// A column the mode needs must be set and present among the dataset's columns,
/// otherwise the result is empty.
pub fn project(dataset: &Dataset, selection: &AxisSelection) -> Projection {
    if dataset.is_empty() {
        return Projection::default();
    }

    let x = selection.x_column.as_deref();
    let y = selection.y_column.as_deref();
    let usable = |col: Option<&str>| col.is_some_and(|c| dataset.has_column(c));

    let ready = match selection.mode {
        AxisMode::Normal => usable(x) && usable(y),
        AxisMode::OnlyX => usable(x),
        AxisMode::OnlyY => usable(y),
    };
    if !ready {
        return Projection::default();
    }

    let rows = dataset.rows();
    let labels: Vec<String> = match selection.mode {
        AxisMode::OnlyY => (1..=rows.len()).map(|i| format!("#{i}")).collect(),
        AxisMode::Normal | AxisMode::OnlyX => {
            let col = x.unwrap_or_default();
            rows.iter().map(|r| stringify_cell(r.get(col))).collect()
        }
    };
    let values: Vec<f64> = match selection.mode {
        AxisMode::OnlyX => (1..=rows.len()).map(|i| i as f64).collect(),
        AxisMode::Normal | AxisMode::OnlyY => {
            let col = y.unwrap_or_default();
            rows.iter().map(|r| coerce_number(r.get(col))).collect()
        }
    };

    Projection { labels, values }
}

/// Display text for a cell. Absent and empty cells become `""`.
pub fn stringify_cell(cell: Option<&CellValue>) -> String {
    match cell {
        None | Some(CellValue::Empty) => String::new(),
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Bool(b)) => b.to_string(),
        Some(CellValue::Number(n)) => format_number(*n),
    }
}

/// Numeric value of a cell; anything that is not a finite number counts as `0`.
pub fn coerce_number(cell: Option<&CellValue>) -> f64 {
    let n = match cell {
        None | Some(CellValue::Empty) => 0.0,
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(CellValue::Text(s)) => parse_numeric_text(s).unwrap_or(0.0),
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Integral values print without a fractional part (`20`, not `20.0`).
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|v| v as f64);
    }
    // `f64::from_str` also accepts "inf"/"nan"; those are rejected as non-finite by the caller.
    t.parse::<f64>().ok()
}
