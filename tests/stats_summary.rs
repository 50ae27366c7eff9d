use sheetviz::models::{AxisMode, AxisSelection, Dataset, Row};
use sheetviz::{project, summarize};

#[test]
fn summary_over_projected_values() {
    let data = Dataset::new(vec![
        Row::new().with("k", "a").with("v", 3.0),
        Row::new().with("k", "b").with("v", "oops"),
        Row::new().with("k", "c").with("v", -1.5),
    ]);
    let p = project(&data, &AxisSelection::new("k", "v", AxisMode::Normal));
    let s = summarize(&p.values).unwrap();
    assert_eq!(s.count, 3);
    assert_eq!(s.sum, 1.5);
    assert_eq!(s.average, 0.5);
    assert_eq!(s.min, -1.5);
    assert_eq!(s.max, 3.0);
}

#[test]
fn empty_series_has_no_summary() {
    assert!(summarize(&[]).is_none());
}

#[test]
fn single_value_is_its_own_summary() {
    let s = summarize(&[7.0]).unwrap();
    assert_eq!((s.sum, s.average, s.min, s.max), (7.0, 7.0, 7.0, 7.0));
    assert_eq!(s.display_line("en"), "Sum: 7.0 | Avg: 7.00 | Min: 7 | Max: 7");
}
