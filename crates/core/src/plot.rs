//! Scatter plot specification: everything a renderer needs, computed purely
//!
//! x is the pollutant `parameter` (categorical axis, first-appearance order),
//! y is the measured `value`, and the color is the categorical code of the
//! `location`.

use serde::Serialize;
use serde_json::Value;

use crate::clean::VALUE_COLUMN;
use crate::encoding::{color_map, first_appearance, Categorical, Rgb};
use crate::error::PipelineError;
use crate::table::Table;

pub const LOCATION_COLUMN: &str = "location";
pub const PARAMETER_COLUMN: &str = "parameter";

pub const PLOT_TITLE: &str = "Air Quality Scatter Plot for US";
pub const X_LABEL: &str = "Parameter";
pub const Y_LABEL: &str = "Value";
pub const COLORBAR_LABEL: &str = "Location";

/// A single scatter point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    /// Index into `PlotSpec::x_categories`
    pub x: usize,
    pub y: f64,
    /// Index into `PlotSpec::colorbar`
    pub location_code: usize,
}

/// One colorbar entry: a location and its color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorbarEntry {
    pub location: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub colorbar_label: String,
    pub x_categories: Vec<String>,
    pub points: Vec<PlotPoint>,
    pub colorbar: Vec<ColorbarEntry>,
    /// Rows left out because `location` or `parameter` was missing or not a scalar
    pub skipped_rows: usize,
}

impl PlotSpec {
    /// y range covering every point, `None` when there are no points
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.y, p.y)),
            Some((lo, hi)) => Some((lo.min(p.y), hi.max(p.y))),
        })
    }

    pub fn location_color(&self, code: usize) -> Option<Rgb> {
        self.colorbar.get(code).map(|entry| entry.color)
    }
}

/// Category label of a cell; numbers and booleans are labeled by their text
fn category_label(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn label_cells(table: &Table, column: &str) -> Vec<Option<String>> {
    table
        .column_cells(column)
        .map(|c| c.and_then(category_label))
        .collect()
}

/// Build the scatter plot of a cleaned table
///
/// The table must carry `location`, `parameter` and `value` columns. Rows
/// with a missing `location` or `parameter`, or one holding an array or object,
/// are counted in `skipped_rows`.
pub fn build_plot_spec(table: &Table) -> Result<PlotSpec, PipelineError> {
    for column in [LOCATION_COLUMN, PARAMETER_COLUMN, VALUE_COLUMN] {
        if !table.has_column(column) {
            return Err(PipelineError::MissingColumn(column.to_string()));
        }
    }

    let location_labels = label_cells(table, LOCATION_COLUMN);
    let locations = Categorical::from_values(location_labels.iter().map(Option::as_deref));
    let parameters = label_cells(table, PARAMETER_COLUMN);
    let x_categories = first_appearance(parameters.iter().map(Option::as_deref));
    let values = table.numeric_column(VALUE_COLUMN);

    let mut points = Vec::with_capacity(table.len());
    let mut skipped_rows = 0;
    for (row, value) in values.iter().enumerate() {
        let x = parameters[row]
            .as_deref()
            .and_then(|p| x_categories.iter().position(|c| c == p));
        match (x, *value, locations.codes[row]) {
            (Some(x), Some(y), Some(location_code)) => points.push(PlotPoint {
                x,
                y,
                location_code,
            }),
            _ => skipped_rows += 1,
        }
    }

    let colorbar = locations
        .categories
        .iter()
        .zip(color_map(locations.len()))
        .map(|(location, color)| ColorbarEntry {
            location: location.clone(),
            color,
        })
        .collect();

    Ok(PlotSpec {
        title: PLOT_TITLE.to_string(),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        colorbar_label: COLORBAR_LABEL.to_string(),
        x_categories,
        points,
        colorbar,
        skipped_rows,
    })
}
