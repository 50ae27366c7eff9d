use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One scalar cell of a spreadsheet row.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Blank cell (JSON `null`).
    Empty,
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

impl From<Value> for CellValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Empty),
            Value::String(s) => CellValue::Text(s),
            // Nested structures are not scalars; keep their JSON text so nothing is lost.
            other => CellValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// A spreadsheet row: column name -> cell, in column insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, CellValue)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; replaces an existing cell with the same column name.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == column) {
            Some(slot) => slot.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Cell for `column`, or `None` when the row has no such key.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// Ordered rows of heterogeneous cells. Rows are assumed, not required, to share
/// one key set; the first row's keys define the selectable columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Selectable columns: the first row's keys, in order.
    pub fn columns(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|r| r.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.rows
            .first()
            .is_some_and(|r| r.keys().any(|k| k == column))
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

/// How labels and values are derived when one axis is a synthetic row index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisMode {
    /// Labels from the X column, values from the Y column.
    #[default]
    Normal,
    /// Labels from the X column, values are 1-based row positions.
    OnlyX,
    /// Labels are `#1, #2, …`, values from the Y column.
    OnlyY,
}

/// Which columns feed the chart axes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub x_column: Option<String>,
    pub y_column: Option<String>,
    pub mode: AxisMode,
}

impl AxisSelection {
    pub fn new(x_column: impl Into<String>, y_column: impl Into<String>, mode: AxisMode) -> Self {
        Self {
            x_column: non_blank(x_column.into()),
            y_column: non_blank(y_column.into()),
            mode,
        }
    }

    /// First column on X and second on Y, when the dataset has at least two columns.
    pub fn default_for(dataset: &Dataset) -> Self {
        let columns = dataset.columns();
        if columns.len() >= 2 {
            Self::new(columns[0].clone(), columns[1].clone(), AxisMode::Normal)
        } else {
            Self::default()
        }
    }

    pub fn with_mode(mut self, mode: AxisMode) -> Self {
        self.mode = mode;
        self
    }

    /// X column name, or `""` when unset.
    pub fn x_name(&self) -> &str {
        self.x_column.as_deref().unwrap_or("")
    }

    /// Y column name, or `""` when unset.
    pub fn y_name(&self) -> &str {
        self.y_column.as_deref().unwrap_or("")
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Labels and values derived from a dataset and an axis selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Projection {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A stored dataset together with its identifying metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Upload {
    pub id: String,
    pub name: String,
    pub uploaded_at: DateTime<Utc>,
    pub dataset: Dataset,
}
