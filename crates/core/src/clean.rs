//! Measurement cleaning: drop missing values, then drop out-of-range values

use serde_json::Value;

use crate::error::PipelineError;
use crate::table::Table;

pub const VALUE_COLUMN: &str = "value";

/// Inclusive lower bound for a plausible measurement
pub const MIN_VALUE: f64 = 0.0;

/// Inclusive upper bound for a plausible measurement
pub const MAX_VALUE: f64 = 1000.0;

pub fn in_range(value: f64) -> bool {
    (MIN_VALUE..=MAX_VALUE).contains(&value)
}

/// Clean a measurement table
///
/// Rows with a missing `value` are dropped, then rows outside
/// `[MIN_VALUE, MAX_VALUE]` are dropped. A table with no rows is returned as
/// is. A non-empty table without a `value` column, or a present `value` that
/// is not a number, is an error rather than something to skip.
pub fn clean(mut table: Table) -> Result<Table, PipelineError> {
    if table.is_empty() {
        return Ok(table);
    }

    if !table.has_column(VALUE_COLUMN) {
        return Err(PipelineError::MissingColumn(VALUE_COLUMN.to_string()));
    }

    for (row, cell) in table.column_cells(VALUE_COLUMN).enumerate() {
        if let Some(cell) = cell {
            if !cell.is_number() {
                return Err(PipelineError::NonNumericValue {
                    row,
                    column: VALUE_COLUMN.to_string(),
                    found: cell.to_string(),
                });
            }
        }
    }

    table.retain_rows(|row| {
        row.get(VALUE_COLUMN)
            .and_then(Value::as_f64)
            .is_some_and(in_range)
    });

    Ok(table)
}
