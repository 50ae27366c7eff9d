//! Where datasets come from: spreadsheet exports on disk and stored upload history.
//!
//! Two formats are understood:
//! - **CSV** with a header row. Cells are typed on load: blank → `Empty`,
//!   `true`/`false` → `Bool`, finite decimals → `Number`, everything else `Text`.
//! - **JSON**, either a top-level array of row objects or the upload API's
//!   `{ "data": [ ... ] }` envelope. Object key order is the column order.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::blocking::Client as HttpClient;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::SourceError;
use crate::models::{CellValue, Dataset, Row, Upload};

/// A loaded dataset and the name it was loaded under (usually the file name).
#[derive(Debug, Clone, PartialEq)]
pub struct NamedDataset {
    pub name: String,
    pub dataset: Dataset,
}

pub trait DatasetSource {
    fn load(&self) -> Result<NamedDataset, SourceError>;
}

/// Supported on-disk dataset formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(DataFormat::Csv),
            "json" => Ok(DataFormat::Json),
            _ => Err(SourceError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A CSV or JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for FileSource {
    fn load(&self) -> Result<NamedDataset, SourceError> {
        let format = DataFormat::from_path(&self.path)?;
        let text = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let dataset = match format {
            DataFormat::Csv => parse_csv(&text)?,
            DataFormat::Json => parse_json(&text)?,
        };
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        debug!("loaded {} rows from {}", dataset.len(), self.path.display());
        Ok(NamedDataset { name, dataset })
    }
}

/// Parse CSV text with a header row.
pub fn parse_csv(text: &str) -> Result<Dataset, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), infer_cell(record.get(i).unwrap_or(""))))
            .collect();
        rows.push(row);
    }
    Ok(Dataset::new(rows))
}

/// Type a raw CSV cell.
pub fn infer_cell(raw: &str) -> CellValue {
    let t = raw.trim();
    if t.is_empty() {
        return CellValue::Empty;
    }
    match t {
        "true" | "TRUE" | "True" => return CellValue::Bool(true),
        "false" | "FALSE" | "False" => return CellValue::Bool(false),
        _ => {}
    }
    match t.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(raw.to_string()),
    }
}

/// Parse JSON text: an array of row objects, or `{ "data": [...] }`.
pub fn parse_json(text: &str) -> Result<Dataset, SourceError> {
    let v: Value = serde_json::from_str(text)?;
    rows_from_value(v)
}

fn rows_from_value(v: Value) -> Result<Dataset, SourceError> {
    let items = match v {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(SourceError::NotTabular),
        },
        _ => return Err(SourceError::NotTabular),
    };
    let mut rows: Vec<Row> = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            return Err(SourceError::NotTabular);
        };
        rows.push(map.into_iter().map(|(k, v)| (k, CellValue::from(v))).collect());
    }
    Ok(Dataset::new(rows))
}

// ------------------------ Upload history ------------------------

/// Previously stored datasets, newest first.
pub trait UploadHistory {
    fn list(&self) -> Result<Vec<Upload>, SourceError>;
}

/// Upload history backed by a directory of CSV/JSON files.
///
/// Upload time is the file's modification time. Files that fail to parse are
/// skipped with a warning so one bad file does not hide the rest.
#[derive(Debug, Clone)]
pub struct DirectoryHistory {
    dir: PathBuf,
}

impl DirectoryHistory {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// `<data dir>/sheetviz/uploads`, when the platform has a data directory.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("sheetviz").join("uploads"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl UploadHistory for DirectoryHistory {
    fn list(&self) -> Result<Vec<Upload>, SourceError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let io_err = |source: std::io::Error| SourceError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut out = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if !path.is_file() || DataFormat::from_path(&path).is_err() {
                continue;
            }
            let loaded = match FileSource::new(&path).load() {
                Ok(l) => l,
                Err(e) => {
                    warn!("skipping {}: {e}", path.display());
                    continue;
                }
            };
            let uploaded_at = std::fs::metadata(&path)
                .and_then(|m| m.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_default();
            out.push(Upload {
                id: loaded.name.clone(),
                name: loaded.name,
                uploaded_at,
                dataset: loaded.dataset,
            });
        }
        sort_newest_first(&mut out);
        Ok(out)
    }
}

/// Upload history held by the upload service (`GET <base>/upload/history`).
#[derive(Debug, Clone)]
pub struct HttpUploadHistory {
    pub base_url: String,
    http: HttpClient,
}

impl HttpUploadHistory {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SourceError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("sheetviz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Remote(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl UploadHistory for HttpUploadHistory {
    fn list(&self) -> Result<Vec<Upload>, SourceError> {
        let url = format!("{}/upload/history", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| SourceError::Remote(format!("GET {url}: {e}")))?;
        if !resp.status().is_success() {
            return Err(SourceError::Remote(format!("GET {url}: HTTP {}", resp.status())));
        }
        let v: Value = resp
            .json()
            .map_err(|e| SourceError::Remote(format!("decode {url}: {e}")))?;
        let mut out = parse_history(v)?;
        sort_newest_first(&mut out);
        Ok(out)
    }
}

/// Decode the upload service's history payload:
/// `[{ "_id", "originalname", "uploadDate", "data": [...] }, ...]`.
///
/// Entries without `uploadDate` fall back to `createdAt`.
pub fn parse_history(v: Value) -> Result<Vec<Upload>, SourceError> {
    let Value::Array(entries) = v else {
        return Err(SourceError::NotTabular);
    };
    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let Value::Object(mut obj) = entry else {
            return Err(SourceError::NotTabular);
        };
        let text = |v: Option<&Value>| match v {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let id = text(obj.get("_id"));
        let name = text(obj.get("originalname"));
        let uploaded_at = obj
            .get("uploadDate")
            .or_else(|| obj.get("createdAt"))
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc))
            .unwrap_or_default();
        let dataset = rows_from_value(obj.remove("data").unwrap_or(Value::Array(Vec::new())))?;
        out.push(Upload {
            id,
            name,
            uploaded_at,
            dataset,
        });
    }
    Ok(out)
}

fn sort_newest_first(uploads: &mut [Upload]) {
    uploads.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_cell_types() {
        assert_eq!(infer_cell(""), CellValue::Empty);
        assert_eq!(infer_cell("  "), CellValue::Empty);
        assert_eq!(infer_cell("true"), CellValue::Bool(true));
        assert_eq!(infer_cell("12.5"), CellValue::Number(12.5));
        assert_eq!(infer_cell(" 7 "), CellValue::Number(7.0));
        assert_eq!(infer_cell("inf"), CellValue::Text("inf".into()));
        assert_eq!(infer_cell("0x1f"), CellValue::Text("0x1f".into()));
        assert_eq!(infer_cell("Jan"), CellValue::Text("Jan".into()));
    }

    #[test]
    fn json_keeps_key_order_and_envelope() {
        let ds = parse_json(r#"{"data":[{"b":1,"a":"x"},{"b":2,"a":"y"}]}"#).unwrap();
        assert_eq!(ds.columns(), vec!["b".to_string(), "a".to_string()]);
        assert_eq!(ds.rows()[1].get("b"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn json_must_be_rows() {
        assert!(matches!(parse_json("[1, 2]"), Err(SourceError::NotTabular)));
        assert!(matches!(parse_json(r#"{"rows":[]}"#), Err(SourceError::NotTabular)));
        assert!(matches!(parse_json("{"), Err(SourceError::Json(_))));
    }

    #[test]
    fn history_payload_is_decoded() {
        let v = serde_json::json!([
            {"_id": "a1", "originalname": "old.xlsx",
             "uploadDate": "2024-01-01T00:00:00Z", "data": [{"k": 1}]},
            {"_id": "b2", "originalname": "new.xlsx",
             "uploadDate": "2024-06-01T12:00:00Z", "data": []},
        ]);
        let mut list = parse_history(v).unwrap();
        sort_newest_first(&mut list);
        assert_eq!(list[0].name, "new.xlsx");
        assert_eq!(list[1].id, "a1");
        assert_eq!(list[1].dataset.len(), 1);
        assert_eq!(list[0].uploaded_at.to_rfc3339(), "2024-06-01T12:00:00+00:00");
    }

    #[test]
    fn history_falls_back_to_created_at() {
        let v = serde_json::json!([
            {"_id": "c3", "originalname": "legacy.csv", "createdAt": "2023-03-05T08:30:00Z"},
        ]);
        let list = parse_history(v).unwrap();
        assert_eq!(list[0].uploaded_at.to_rfc3339(), "2023-03-05T08:30:00+00:00");
    }
}
