//! Request construction and response parsing for the OpenAQ measurements API
//!
//! The network call itself lives in the binary crate. Everything here is pure:
//! the query parameters that go out and the table that comes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PipelineError;
use crate::table::{json_type_name, Table};

/// Default measurements endpoint
pub const DEFAULT_API_URL: &str = "https://api.openaq.org/v1/measurements";

/// Notice emitted when the response carries no `results` key
pub const NO_RESULTS_NOTICE: &str = "No results found in the API response.";

/// Parameters of a single measurements request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementsQuery {
    pub country: String,
    pub limit: u32,
}

impl MeasurementsQuery {
    pub fn new(country: impl Into<String>, limit: u32) -> Self {
        Self {
            country: country.into(),
            limit,
        }
    }

    /// Query string pairs, in the order they are sent
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("country", self.country.clone()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// Result of parsing a measurements response
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub table: Table,
    /// Informational message, set when the response had no `results`
    pub notice: Option<String>,
}

/// Turn a decoded response body into a measurement table
///
/// A body without a `results` key is not an error: it yields an empty table
/// and a single notice. A `results` value that is not an array of objects is
/// schema drift.
pub fn parse_measurements(body: &Value) -> Result<FetchOutcome, PipelineError> {
    let Some(results) = body.get("results") else {
        return Ok(FetchOutcome {
            table: Table::empty(),
            notice: Some(NO_RESULTS_NOTICE.to_string()),
        });
    };

    let records = results.as_array().ok_or_else(|| {
        PipelineError::MalformedResults(format!(
            "expected an array, found {}",
            json_type_name(results)
        ))
    })?;

    Ok(FetchOutcome {
        table: Table::from_records(records)?,
        notice: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ============================================================================
    // MeasurementsQuery tests
    // ============================================================================

    #[test]
    fn test_query_pairs() {
        let query = MeasurementsQuery::new("US", 100);

        assert_eq!(
            query.query_pairs(),
            vec![("country", "US".to_string()), ("limit", "100".to_string())]
        );
    }

    #[test]
    fn test_query_pairs_country_is_passed_through() {
        let query = MeasurementsQuery::new(" in ", 5);

        assert_eq!(query.query_pairs()[0].1, " in ");
    }

    // ============================================================================
    // parse_measurements tests
    // ============================================================================

    #[test]
    fn test_parse_measurements_with_results() {
        let body = json!({
            "meta": {"found": 2},
            "results": [
                {"location": "A", "parameter": "pm25", "value": 12, "unit": "µg/m³"},
                {"location": "B", "parameter": "no2", "value": 7.5, "unit": "ppm"}
            ]
        });

        let outcome = parse_measurements(&body).unwrap();

        assert!(outcome.notice.is_none());
        assert_eq!(outcome.table.len(), 2);
        assert!(outcome.table.has_column("unit"));
    }

    #[test]
    fn test_parse_measurements_without_results_yields_one_notice() {
        let body = json!({"message": "rate limited"});

        let outcome = parse_measurements(&body).unwrap();

        assert!(outcome.table.is_empty());
        assert_eq!(outcome.notice.as_deref(), Some(NO_RESULTS_NOTICE));
    }

    #[test]
    fn test_parse_measurements_empty_results() {
        let body = json!({"results": []});

        let outcome = parse_measurements(&body).unwrap();

        assert!(outcome.table.is_empty());
        assert!(outcome.notice.is_none());
    }

    #[test]
    fn test_parse_measurements_results_not_an_array() {
        let body = json!({"results": {"location": "A"}});

        let err = parse_measurements(&body).unwrap_err();

        assert_eq!(
            err,
            PipelineError::MalformedResults("expected an array, found an object".to_string())
        );
    }

    #[test]
    fn test_parse_measurements_non_object_body() {
        let outcome = parse_measurements(&json!([1, 2, 3])).unwrap();

        assert!(outcome.table.is_empty());
        assert!(outcome.notice.is_some());
    }
}
