use airq_core::openaq::MeasurementsQuery;
use serde_json::Value;

use crate::error::Error;

/// Fetch one page of measurements and decode the body as JSON
///
/// One request per call, no retries. Non-2xx responses and bodies that are
/// not JSON are reported as errors instead of being parsed.
pub async fn fetch_measurements(
    client: &reqwest::Client,
    api_url: &str,
    query: &MeasurementsQuery,
) -> Result<Value, Error> {
    log::info!(
        "GET {} country={} limit={}",
        api_url,
        query.country,
        query.limit
    );

    let response = client
        .get(api_url)
        .query(&query.query_pairs())
        .send()
        .await
        .map_err(|e| Error::Network(format!("Failed to reach {api_url}: {e}")))?;

    let status = response.status();
    log::debug!("{} responded with {}", api_url, status);

    if !status.is_success() {
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            url: api_url.to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Network(format!("Failed to read response body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| Error::MalformedJson(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/v1/measurements")
    }

    #[tokio::test]
    async fn test_fetch_measurements_sends_country_and_limit() {
        let router = Router::new().route(
            "/v1/measurements",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(serde_json::json!({ "echo": params }))
            }),
        );
        let url = serve(router).await;

        let body = fetch_measurements(
            &reqwest::Client::new(),
            &url,
            &MeasurementsQuery::new("IN", 25),
        )
        .await
        .unwrap();

        assert_eq!(body["echo"]["country"], "IN");
        assert_eq!(body["echo"]["limit"], "25");
    }

    #[tokio::test]
    async fn test_fetch_measurements_non_success_status() {
        let router = Router::new().route(
            "/v1/measurements",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let url = serve(router).await;

        let err = fetch_measurements(&reqwest::Client::new(), &url, &MeasurementsQuery::new("US", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::HttpStatus { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_fetch_measurements_malformed_json() {
        let router = Router::new().route("/v1/measurements", get(|| async { "<html>oops</html>" }));
        let url = serve(router).await;

        let err = fetch_measurements(&reqwest::Client::new(), &url, &MeasurementsQuery::new("US", 1))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MalformedJson(_)));
    }

    #[tokio::test]
    async fn test_fetch_measurements_unreachable_host() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_measurements(
            &reqwest::Client::new(),
            &format!("http://{addr}/v1/measurements"),
            &MeasurementsQuery::new("US", 1),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Network(_)));
    }
}
