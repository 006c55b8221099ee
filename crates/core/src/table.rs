//! In-memory measurement table
//!
//! Rows are the JSON objects delivered by the API, kept verbatim so passthrough
//! fields survive cleaning. Columns are the union of row keys in
//! first-appearance order. A missing key and a JSON `null` are both treated as
//! a missing cell.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PipelineError;

/// A single row: field name to JSON value
pub type Row = Map<String, Value>;

/// Tabular collection of measurement records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Empty table with no columns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from row objects
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        Self { columns, rows }
    }

    /// Build a table from a JSON array of objects
    ///
    /// Any entry that is not an object is schema drift and is rejected.
    pub fn from_records(records: &[Value]) -> Result<Self, PipelineError> {
        let rows = records
            .iter()
            .enumerate()
            .map(|(idx, record)| match record {
                Value::Object(map) => Ok(map.clone()),
                other => Err(PipelineError::MalformedResults(format!(
                    "entry {idx} is {}, expected an object",
                    json_type_name(other)
                ))),
            })
            .collect::<Result<Vec<Row>, PipelineError>>()?;

        Ok(Self::from_rows(rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
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

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Cell lookup, `None` when the key is absent or the value is `null`
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .filter(|v| !v.is_null())
    }

    /// All cells of a column, in row order
    pub fn column_cells<'a>(&'a self, column: &'a str) -> impl Iterator<Item = Option<&'a Value>> {
        self.rows
            .iter()
            .map(move |r| r.get(column).filter(|v| !v.is_null()))
    }

    /// Numeric view of a column, `None` for missing or non-numeric cells
    pub fn numeric_column(&self, column: &str) -> Vec<Option<f64>> {
        self.column_cells(column)
            .map(|cell| cell.and_then(Value::as_f64))
            .collect()
    }

    /// A column is numeric when it has at least one present cell and every
    /// present cell is a JSON number.
    pub fn is_numeric_column(&self, column: &str) -> bool {
        let mut seen = false;
        for cell in self.column_cells(column) {
            match cell {
                Some(Value::Number(_)) => seen = true,
                Some(_) => return false,
                None => {}
            }
        }
        seen
    }

    /// Names of numeric columns, in column order
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric_column(c))
            .cloned()
            .collect()
    }

    /// Keep rows for which `keep` returns true; columns are left untouched
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }
}

/// Short name of a JSON value's type, for diagnostics
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
