use crate::config::MatchServiceConfig;
use crate::workflows::intake::FunderSearch;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Default number of candidates requested per search.
pub const DEFAULT_SEARCH_LIMIT: usize = 15;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes of the retrieval backend. The API layer collapses all
/// of them into a single "match service unavailable" notice; the
/// variants exist for the logs.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("could not reach the match service: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("match service responded with status {status}")]
    Status { status: StatusCode },
    #[error("match service returned a malformed payload: {0}")]
    Payload(#[source] reqwest::Error),
    #[error("failed to construct the match service client: {0}")]
    Client(#[source] reqwest::Error),
}

/// One raw record from the retrieval backend. Shapes vary across
/// backend generations; aliases and optional fields absorb the
/// variation so normalization can resolve one record at a time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawMatchResult {
    #[serde(alias = "fullText", alias = "full_text", alias = "excerpt")]
    pub document: Option<String>,
    pub metadata: Option<MatchMetadata>,
    /// Current similarity signal, 0-1, higher is better.
    pub relevance: Option<f64>,
    /// Legacy dissimilarity signal, lower is better.
    pub distance: Option<f64>,
}

/// Structured metadata as newer backend builds emit it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchMetadata {
    pub fund_name: Option<String>,
    pub funder_name: Option<String>,
    pub region: Option<String>,
    pub funding_range: Option<String>,
    pub deadline: Option<String>,
    /// Comma-joined category list.
    pub categories: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    collection: &'a str,
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<RawMatchResult>>,
}

/// Thin client over the funding-opportunity retrieval endpoint.
/// Fire-once: no retry, no backoff; callers decide what a failure
/// means. Configuration is injected, never read from the environment
/// here, so tests can point it at a scripted server.
#[derive(Debug, Clone)]
pub struct MatchClient {
    config: MatchServiceConfig,
    http: reqwest::Client,
}

impl MatchClient {
    pub fn new(config: MatchServiceConfig) -> Result<Self, MatchServiceError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(MatchServiceError::Client)?;

        Ok(Self { config, http })
    }

    /// POST the query to the search endpoint and hand back whatever the
    /// backend returned. A missing or null `results` list reads as
    /// empty; a structurally malformed body is an error.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawMatchResult>, MatchServiceError> {
        let url = format!("{}/search", self.config.base_url);
        debug!(%url, limit, query_chars = query.len(), "funder search request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(&SearchRequest {
                query,
                collection: &self.config.collection,
                limit,
            })
            .send()
            .await
            .map_err(MatchServiceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MatchServiceError::Status { status });
        }

        let body: SearchResponse = response.json().await.map_err(MatchServiceError::Payload)?;
        Ok(body.results.unwrap_or_default())
    }

    /// Backend-defined statistics, passed through uninterpreted.
    pub async fn stats(&self) -> Result<Value, MatchServiceError> {
        let url = format!(
            "{}/stats?token={}",
            self.config.base_url, self.config.token
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(MatchServiceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(MatchServiceError::Status { status });
        }

        response.json().await.map_err(MatchServiceError::Payload)
    }

    /// Liveness probe. Any 2xx means healthy; everything else, network
    /// failure included, reads as unhealthy. Never errors.
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

impl FunderSearch for MatchClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawMatchResult>, MatchServiceError> {
        MatchClient::search(self, query, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> MatchClient {
        MatchClient::new(MatchServiceConfig {
            base_url: server.uri(),
            token: "test-token".to_string(),
            collection: "funding_opportunities".to_string(),
        })
        .expect("client builds")
    }

    #[tokio::test]
    async fn search_sends_bearer_token_collection_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_partial_json(serde_json::json!({
                "query": "Sport in Otago",
                "collection": "funding_opportunities",
                "limit": 15,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    { "document": "# Otago Community Trust", "relevance": 0.9 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let results = client_for(&server)
            .search("Sport in Otago", DEFAULT_SEARCH_LIMIT)
            .await
            .expect("search succeeds");

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].document.as_deref(),
            Some("# Otago Community Trust")
        );
        assert_eq!(results[0].relevance, Some(0.9));
    }

    #[tokio::test]
    async fn absent_results_list_reads_as_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let results = client_for(&server)
            .search("", DEFAULT_SEARCH_LIMIT)
            .await
            .expect("search succeeds");
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn non_2xx_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search("anything", DEFAULT_SEARCH_LIMIT)
            .await
            .expect_err("search fails");
        assert!(matches!(
            err,
            MatchServiceError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE
            }
        ));
    }

    #[tokio::test]
    async fn malformed_results_shape_fails_loudly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "results": "not-a-list" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .search("anything", DEFAULT_SEARCH_LIMIT)
            .await
            .expect_err("decode fails");
        assert!(matches!(err, MatchServiceError::Payload(_)));
    }

    #[tokio::test]
    async fn stats_passes_token_as_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stats"))
            .and(query_param("token", "test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "documents": 412 })),
            )
            .mount(&server)
            .await;

        let stats = client_for(&server).stats().await.expect("stats succeed");
        assert_eq!(stats["documents"], 412);
    }

    #[tokio::test]
    async fn health_reflects_status_and_never_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        assert!(client_for(&server).health().await);

        let down = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&down)
            .await;
        assert!(!client_for(&down).health().await);

        let unreachable = MatchClient::new(MatchServiceConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            token: "test-token".to_string(),
            collection: "funding_opportunities".to_string(),
        })
        .expect("client builds");
        assert!(!unreachable.health().await);
    }

    #[test]
    fn raw_result_accepts_legacy_text_field_names() {
        let result: RawMatchResult =
            serde_json::from_value(serde_json::json!({ "fullText": "body" })).expect("parses");
        assert_eq!(result.document.as_deref(), Some("body"));

        let result: RawMatchResult =
            serde_json::from_value(serde_json::json!({ "excerpt": "snippet" })).expect("parses");
        assert_eq!(result.document.as_deref(), Some("snippet"));
    }
}
