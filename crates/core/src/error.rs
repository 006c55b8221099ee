/// Errors raised by the pure fetch/clean/analyze pipeline
///
/// Missing data (an absent `results` key, an empty table, a table without
/// numeric columns) is not an error: those cases produce notices and a
/// neutral outcome. Everything in here is either malformed user input or
/// upstream schema drift.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Invalid limit '{0}': expected a positive integer")]
    InvalidLimit(String),

    #[error("Missing expected column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: '{column}' is not numeric ({found})")]
    NonNumericValue {
        row: usize,
        column: String,
        found: String,
    },

    #[error("Malformed 'results' in API response: {0}")]
    MalformedResults(String),
}
