//! HTTP GraphQL client

use std::time::Duration;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use cs_core::QueryDocument;

use super::StatsTransport;
use crate::DataError;

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Client for a GraphQL endpoint speaking JSON over HTTP POST
pub struct GraphQlClient {
    endpoint: String,
    http: reqwest::Client,
}

impl GraphQlClient {
    /// Create a client for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Split a response body into its data or its error messages
fn decode_response(body: Value) -> Result<Value, DataError> {
    let response: GraphQlResponse = serde_json::from_value(body)?;

    if !response.errors.is_empty() {
        return Err(DataError::GraphQl(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    match response.data {
        Some(Value::Null) | None => Err(DataError::GraphQl(vec!["response has no data".to_string()])),
        Some(data) => Ok(data),
    }
}

#[async_trait]
impl StatsTransport for GraphQlClient {
    async fn execute(&self, query: &QueryDocument) -> Result<Value, DataError> {
        tracing::info!("POST {} operation {}", self.endpoint, query.operation());
        tracing::debug!("Query: {}", query.inline_text());

        let body: Value = self.http
            .post(&self.endpoint)
            .json(&query.to_request_body())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        decode_response(body)
    }

    fn source_name(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_data() {
        let data = decode_response(json!({ "data": { "summary": { "confirmed": 1 } } })).unwrap();
        assert_eq!(data["summary"]["confirmed"], 1);
    }

    #[test]
    fn test_decode_errors_win_over_partial_data() {
        let err = decode_response(json!({
            "data": { "country": null },
            "errors": [{ "message": "Country not found" }, { "message": "second" }]
        }))
        .unwrap_err();

        match err {
            DataError::GraphQl(messages) => assert_eq!(messages, vec!["Country not found", "second"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_missing_data() {
        assert!(matches!(decode_response(json!({ "data": null })), Err(DataError::GraphQl(_))));
        assert!(matches!(decode_response(json!([1, 2])), Err(DataError::Json(_))));
    }

    #[test]
    fn test_client_keeps_endpoint() {
        let client = GraphQlClient::new("http://localhost:4000/graphql", Duration::from_secs(5)).unwrap();
        assert_eq!(client.source_name(), "http://localhost:4000/graphql");
    }
}
