use sheetviz::models::{AxisMode, AxisSelection, CellValue, Dataset, Row};
use sheetviz::project;
use sheetviz::projection::{coerce_number, stringify_cell};

fn sales() -> Dataset {
    Dataset::new(vec![
        Row::new().with("Month", "Jan").with("Sales", 10.0),
        Row::new().with("Month", "Feb").with("Sales", "12.5"),
        Row::new().with("Month", "Mar").with("Sales", "n/a"),
        Row::new().with("Month", CellValue::Empty).with("Sales", true),
    ])
}

#[test]
fn normal_mode_pairs_columns_row_by_row() {
    let p = project(&sales(), &AxisSelection::new("Month", "Sales", AxisMode::Normal));
    assert_eq!(p.labels, vec!["Jan", "Feb", "Mar", ""]);
    assert_eq!(p.values, vec![10.0, 12.5, 0.0, 1.0]);
}

#[test]
fn only_y_uses_hash_index_labels() {
    let p = project(&sales(), &AxisSelection::new("", "Sales", AxisMode::OnlyY));
    assert_eq!(p.labels, vec!["#1", "#2", "#3", "#4"]);
    assert_eq!(p.values.len(), 4);
}

#[test]
fn only_x_uses_row_positions_as_values() {
    let p = project(&sales(), &AxisSelection::new("Month", "", AxisMode::OnlyX));
    assert_eq!(p.labels, vec!["Jan", "Feb", "Mar", ""]);
    assert_eq!(p.values, vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn missing_selection_or_unknown_column_is_empty() {
    let ds = sales();
    assert!(project(&ds, &AxisSelection::new("Month", "", AxisMode::Normal)).is_empty());
    assert!(project(&ds, &AxisSelection::new("", "Sales", AxisMode::OnlyX)).is_empty());
    assert!(project(&ds, &AxisSelection::new("Month", "Profit", AxisMode::Normal)).is_empty());
    let any = AxisSelection::new("a", "b", AxisMode::Normal);
    assert!(project(&Dataset::default(), &any).is_empty());
}

#[test]
fn lengths_always_match_rows() {
    let ds = sales();
    for mode in [AxisMode::Normal, AxisMode::OnlyX, AxisMode::OnlyY] {
        let p = project(&ds, &AxisSelection::new("Month", "Sales", mode));
        assert_eq!(p.labels.len(), ds.len());
        assert_eq!(p.values.len(), ds.len());
    }
}

#[test]
fn coercion_and_stringify_rules() {
    assert_eq!(coerce_number(Some(&CellValue::from(" 42 "))), 42.0);
    assert_eq!(coerce_number(Some(&CellValue::from(""))), 0.0);
    assert_eq!(coerce_number(Some(&CellValue::from("abc"))), 0.0);
    assert_eq!(coerce_number(Some(&CellValue::from(false))), 0.0);
    assert_eq!(coerce_number(None), 0.0);
    assert_eq!(stringify_cell(Some(&CellValue::from(20.0))), "20");
    assert_eq!(stringify_cell(Some(&CellValue::from(2.5))), "2.5");
    assert_eq!(stringify_cell(None), "");
}

#[test]
fn default_selection_takes_first_two_columns() {
    let sel = AxisSelection::default_for(&sales());
    assert_eq!(sel.x_name(), "Month");
    assert_eq!(sel.y_name(), "Sales");
    assert_eq!(sel.mode, AxisMode::Normal);
}
