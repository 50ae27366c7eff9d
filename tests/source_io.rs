use std::fs;
use std::time::{Duration, SystemTime};

use sheetviz::source::{DatasetSource, DirectoryHistory, FileSource, UploadHistory};
use sheetviz::{CellValue, SourceError};

#[test]
fn loads_csv_with_typed_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");
    fs::write(&path, "Month,Sales,Closed\nJan,10,true\nFeb,,false\nMar,n/a,\n").unwrap();

    let loaded = FileSource::new(&path).load().unwrap();
    assert_eq!(loaded.name, "sales.csv");
    assert_eq!(loaded.dataset.columns(), vec!["Month", "Sales", "Closed"]);
    let rows = loaded.dataset.rows();
    assert_eq!(rows[0].get("Sales"), Some(&CellValue::Number(10.0)));
    assert_eq!(rows[0].get("Closed"), Some(&CellValue::Bool(true)));
    assert_eq!(rows[1].get("Sales"), Some(&CellValue::Empty));
    assert_eq!(rows[2].get("Sales"), Some(&CellValue::Text("n/a".into())));
}

#[test]
fn loads_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rows.JSON");
    fs::write(&path, r#"[{"Region":"North","Units":4},{"Region":"South","Units":null}]"#).unwrap();
    let loaded = FileSource::new(&path).load().unwrap();
    assert_eq!(loaded.dataset.len(), 2);
    assert_eq!(loaded.dataset.rows()[1].get("Units"), Some(&CellValue::Empty));
}

#[test]
fn rejects_unknown_extension_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let xlsx = dir.path().join("book.xlsx");
    fs::write(&xlsx, b"PK").unwrap();
    assert!(matches!(
        FileSource::new(&xlsx).load(),
        Err(SourceError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        FileSource::new(dir.path().join("gone.csv")).load(),
        Err(SourceError::Io { .. })
    ));
}

#[test]
fn directory_history_is_newest_first_and_skips_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let old = dir.path().join("old.csv");
    let new = dir.path().join("new.json");
    fs::write(&old, "a,b\n1,2\n").unwrap();
    fs::write(&new, r#"[{"a":1,"b":2},{"a":3,"b":4}]"#).unwrap();
    fs::write(dir.path().join("broken.json"), "{").unwrap();
    fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let past = SystemTime::now() - Duration::from_secs(3600);
    fs::File::options()
        .write(true)
        .open(&old)
        .unwrap()
        .set_modified(past)
        .unwrap();

    let list = DirectoryHistory::new(dir.path()).list().unwrap();
    let names: Vec<&str> = list.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["new.json", "old.csv"]);
    assert_eq!(list[0].dataset.len(), 2);
}

#[test]
fn missing_history_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let list = DirectoryHistory::new(dir.path().join("none")).list().unwrap();
    assert!(list.is_empty());
}
