//! Correlation analysis over the numeric columns of a table

use serde::Serialize;

use crate::table::Table;

pub const EMPTY_TABLE_NOTICE: &str = "No data available for correlation analysis.";
pub const NO_NUMERIC_COLUMNS_NOTICE: &str = "No numeric columns available for correlation analysis.";

/// Why the analyzer produced no correlation matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoResultReason {
    EmptyTable,
    NoNumericColumns,
}

impl NoResultReason {
    pub fn message(&self) -> &'static str {
        match self {
            NoResultReason::EmptyTable => EMPTY_TABLE_NOTICE,
            NoResultReason::NoNumericColumns => NO_NUMERIC_COLUMNS_NOTICE,
        }
    }
}

/// Square, symmetric matrix of Pearson coefficients
///
/// `values[i][j]` is the coefficient between `columns[i]` and `columns[j]`.
/// The diagonal is always 1.0. An off-diagonal entry is `None` when it is
/// undefined (fewer than two paired observations or a constant column).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Coefficient by column names
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Outcome of the analysis step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis {
    Correlations { matrix: CorrelationMatrix },
    NoResult { reason: NoResultReason },
}

impl Analysis {
    pub fn matrix(&self) -> Option<&CorrelationMatrix> {
        match self {
            Analysis::Correlations { matrix } => Some(matrix),
            Analysis::NoResult { .. } => None,
        }
    }

    /// Message to surface for a "no result" outcome
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Analysis::Correlations { .. } => None,
            Analysis::NoResult { reason } => Some(reason.message()),
        }
    }
}

/// Compute the pairwise correlation matrix of a table's numeric columns
///
/// Only an empty table or one without numeric columns yields no result. A
/// single row with one numeric column is still the 1x1 identity.
pub fn analyze(table: &Table) -> Analysis {
    if table.is_empty() {
        return Analysis::NoResult {
            reason: NoResultReason::EmptyTable,
        };
    }

    let columns = table.numeric_columns();
    if columns.is_empty() {
        return Analysis::NoResult {
            reason: NoResultReason::NoNumericColumns,
        };
    }

    let data: Vec<Vec<Option<f64>>> = columns.iter().map(|c| table.numeric_column(c)).collect();

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pearson(&data[i], &data[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Analysis::Correlations {
        matrix: CorrelationMatrix { columns, values },
    }
}

/// Pearson coefficient over pairwise-complete observations
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let count = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / count;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / count;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let divisor = (var_x * var_y).sqrt();
    if divisor == 0.0 || !divisor.is_finite() {
        return None;
    }

    Some((cov / divisor).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn table(records: Value) -> Table {
        Table::from_records(records.as_array().unwrap()).unwrap()
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("coefficient should be defined");
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {expected}, got {actual}"
        );
    }

    // ============================================================================
    // analyze tests
    // ============================================================================

    #[test]
    fn test_analyze_empty_table() {
        let analysis = analyze(&Table::empty());

        assert_eq!(
            analysis,
            Analysis::NoResult {
                reason: NoResultReason::EmptyTable
            }
        );
        assert_eq!(analysis.notice(), Some(EMPTY_TABLE_NOTICE));
    }

    #[test]
    fn test_analyze_no_numeric_columns() {
        let t = table(json!([
            {"location": "A", "parameter": "pm25"},
            {"location": "B", "parameter": "no2"}
        ]));

        let analysis = analyze(&t);

        assert!(analysis.matrix().is_none());
        assert_eq!(analysis.notice(), Some(NO_NUMERIC_COLUMNS_NOTICE));
    }

    #[test]
    fn test_analyze_single_numeric_column_is_identity() {
        let t = table(json!([{"value": 10}, {"value": 20}, {"value": 30}]));

        let analysis = analyze(&t);
        let matrix = analysis.matrix().unwrap();

        assert_eq!(matrix.columns, vec!["value".to_string()]);
        assert_eq!(matrix.values, vec![vec![Some(1.0)]]);
        assert!(analysis.notice().is_none());
    }

    #[test]
    fn test_analyze_single_row_is_still_identity() {
        let t = table(json!([{"location": "A", "parameter": "pm25", "value": 12}]));

        let matrix = analyze(&t).matrix().cloned().unwrap();

        assert_eq!(matrix.values, vec![vec![Some(1.0)]]);
    }

    #[test]
    fn test_analyze_matrix_is_square_and_symmetric() {
        let t = table(json!([
            {"value": 1, "latitude": 10.0, "longitude": 3},
            {"value": 2, "latitude": 19.0, "longitude": 1},
            {"value": 3, "latitude": 31.0, "longitude": 2},
            {"value": 4, "latitude": 39.0, "longitude": 0}
        ]));

        let matrix = analyze(&t).matrix().cloned().unwrap();

        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert_eq!(matrix.values[i].len(), 3);
            assert_eq!(matrix.values[i][i], Some(1.0));
            for j in 0..3 {
                assert_eq!(matrix.values[i][j], matrix.values[j][i]);
            }
        }
    }

    #[test]
    fn test_analyze_perfect_negative_correlation() {
        let t = table(json!([
            {"value": 1, "other": 30},
            {"value": 2, "other": 20},
            {"value": 3, "other": 10}
        ]));

        let matrix = analyze(&t).matrix().cloned().unwrap();

        assert_close(matrix.get("value", "other"), -1.0);
    }

    #[test]
    fn test_analyze_ignores_non_numeric_columns() {
        let t = table(json!([
            {"value": 1, "location": "A", "other": 2},
            {"value": 2, "location": "B", "other": 4}
        ]));

        let matrix = analyze(&t).matrix().cloned().unwrap();

        assert_eq!(matrix.columns, vec!["value".to_string(), "other".to_string()]);
    }

    #[test]
    fn test_analyze_constant_column_off_diagonal_undefined() {
        let t = table(json!([
            {"value": 1, "flat": 5},
            {"value": 2, "flat": 5},
            {"value": 3, "flat": 5}
        ]));

        let matrix = analyze(&t).matrix().cloned().unwrap();

        assert_eq!(matrix.get("flat", "flat"), Some(1.0));
        assert_eq!(matrix.get("value", "flat"), None);
    }

    #[test]
    fn test_analyze_does_not_mutate_input() {
        let t = table(json!([{"value": 1}, {"value": 2}]));
        let before = t.clone();

        let _ = analyze(&t);

        assert_eq!(t, before);
    }

    // ============================================================================
    // pearson tests
    // ============================================================================

    #[test]
    fn test_pearson_known_value() {
        let xs = [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0)];
        let ys = [Some(2.0), Some(4.0), Some(5.0), Some(4.0), Some(5.0)];

        // cov = 6, var_x = 10, var_y = 6
        assert_close(pearson(&xs, &ys), 6.0 / (60.0f64).sqrt());
    }

    #[test]
    fn test_pearson_uses_pairwise_complete_rows() {
        let xs = [Some(1.0), None, Some(2.0), Some(3.0)];
        let ys = [Some(2.0), Some(100.0), Some(4.0), Some(6.0)];

        assert_close(pearson(&xs, &ys), 1.0);
    }

    #[test]
    fn test_pearson_needs_two_pairs() {
        assert_eq!(pearson(&[Some(1.0)], &[Some(2.0)]), None);
        assert_eq!(pearson(&[Some(1.0), None], &[None, Some(2.0)]), None);
    }
}
