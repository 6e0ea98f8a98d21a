//! Document-search client
//!
//! Queries the Discovery v2 `query` endpoint for policy documents and returns
//! the matched results. Requests ask for structured fields, sections, flattened
//! text and passages with answer spans, which is everything the fact resolver
//! can use.
//!
//! # Examples
//!
//! ```no_run
//! use plancheck_discovery::{DiscoveryClient, DiscoveryEndpoint};
//!
//! let endpoint = DiscoveryEndpoint {
//!     base_url: "https://api.us-south.discovery.watson.cloud.ibm.com".to_string(),
//!     instance_id: "instance".to_string(),
//!     project_id: "project".to_string(),
//!     version: "2022-08-01".to_string(),
//!     auth: "base64-credentials".to_string(),
//! };
//! let client = DiscoveryClient::new(endpoint, 30).unwrap();
//! ```

use crate::SearchError;
use async_trait::async_trait;
use plancheck_domain::{DocumentResult, SearchClient, SearchQuery, SearchResponse};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Discovery API version
pub const DEFAULT_VERSION: &str = "2022-08-01";

/// Document fields returned with each result
const RETURN_FIELDS: &[&str] = &[
    "title",
    "issuer",
    "policy_number",
    "group_number",
    "effective_date",
    "expiration_date",
    "sections",
    "structured",
    "text",
];

/// Fields the search service may draw passages from
const PASSAGE_FIELDS: &[&str] = &[
    "text",
    "sections.body",
    "sections.heading",
    "structured.plan.*",
    "structured.cost_sharing_in_network.*",
    "structured.cost_sharing_out_of_network.*",
    "structured.pharmacy.*",
    "structured.authorization_rules.*",
    "structured.service_limits.*",
    "structured.examples.*",
    "structured.contact.*",
];

const PASSAGE_CHARACTERS: u32 = 300;

/// Where and how to reach the search service
#[derive(Debug, Clone)]
pub struct DiscoveryEndpoint {
    /// Service root (e.g. `https://api.us-south.discovery.watson.cloud.ibm.com`)
    pub base_url: String,
    /// Service instance
    pub instance_id: String,
    /// Project holding the policy documents
    pub project_id: String,
    /// API version date
    pub version: String,
    /// Pre-encoded basic-auth credentials
    pub auth: String,
}

impl DiscoveryEndpoint {
    /// Full URL of the query endpoint
    pub fn query_url(&self) -> String {
        format!(
            "{}/instances/{}/v2/projects/{}/query?version={}",
            self.base_url.trim_end_matches('/'),
            self.instance_id,
            self.project_id,
            self.version
        )
    }
}

/// Request body for the query API
#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    natural_language_query: &'a str,
    filter: &'a str,
    count: u32,
    #[serde(rename = "return")]
    return_fields: &'static [&'static str],
    spelling_suggestions: bool,
    highlight: bool,
    passages: PassagesOptions,
    table_results: TableResultsOptions,
}

#[derive(Debug, Serialize)]
struct PassagesOptions {
    enabled: bool,
    fields: &'static [&'static str],
    find_answers: bool,
    characters: u32,
}

#[derive(Debug, Serialize)]
struct TableResultsOptions {
    enabled: bool,
}

impl<'a> QueryRequest<'a> {
    pub(crate) fn from_query(query: &'a SearchQuery) -> Self {
        Self {
            natural_language_query: &query.natural_language_query,
            filter: &query.filter,
            count: query.count,
            return_fields: RETURN_FIELDS,
            spelling_suggestions: true,
            highlight: true,
            passages: PassagesOptions {
                enabled: true,
                fields: PASSAGE_FIELDS,
                find_answers: true,
                characters: PASSAGE_CHARACTERS,
            },
            table_results: TableResultsOptions { enabled: false },
        }
    }
}

/// HTTP client for the document-search service
pub struct DiscoveryClient {
    endpoint: DiscoveryEndpoint,
    client: reqwest::Client,
}

impl DiscoveryClient {
    /// Create a client with the given request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(endpoint: DiscoveryEndpoint, timeout_secs: u64) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SearchError::Communication(format!("Failed to build client: {}", e)))?;

        Ok(Self { endpoint, client })
    }

    /// The endpoint this client talks to
    pub fn endpoint(&self) -> &DiscoveryEndpoint {
        &self.endpoint
    }

    /// Run a query against the search service
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The service is unreachable or times out
    /// - The service answers with a non-success status
    /// - The response body is not JSON
    pub async fn query(&self, query: &SearchQuery) -> Result<Vec<DocumentResult>, SearchError> {
        let url = self.endpoint.query_url();
        let body = QueryRequest::from_query(query);

        debug!(%url, query = %query.natural_language_query, "Sending search query");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", self.endpoint.auth))
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(%status, "Search service returned an error");
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        debug!(results = parsed.results.len(), "Search query returned");
        Ok(parsed.results)
    }
}

#[async_trait]
impl SearchClient for DiscoveryClient {
    type Error = SearchError;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<DocumentResult>, Self::Error> {
        self.query(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(base_url: &str) -> DiscoveryEndpoint {
        DiscoveryEndpoint {
            base_url: base_url.to_string(),
            instance_id: "inst-1".to_string(),
            project_id: "proj-1".to_string(),
            version: DEFAULT_VERSION.to_string(),
            auth: "secret".to_string(),
        }
    }

    #[test]
    fn test_query_url() {
        let endpoint = endpoint("https://discovery.example.com/");
        assert_eq!(
            endpoint.query_url(),
            "https://discovery.example.com/instances/inst-1/v2/projects/proj-1/query?version=2022-08-01"
        );
    }

    #[test]
    fn test_query_request_body() {
        let query = SearchQuery::new(
            "what is my deductible",
            "document_type::\"policy_certificate\"",
            3,
        );
        let body = serde_json::to_value(QueryRequest::from_query(&query)).unwrap();

        assert_eq!(body["natural_language_query"], "what is my deductible");
        assert_eq!(body["filter"], "document_type::\"policy_certificate\"");
        assert_eq!(body["count"], 3);
        assert_eq!(body["return"].as_array().unwrap().len(), RETURN_FIELDS.len());
        assert_eq!(body["spelling_suggestions"], true);
        assert_eq!(body["highlight"], true);
        assert_eq!(body["passages"]["enabled"], true);
        assert_eq!(body["passages"]["find_answers"], true);
        assert_eq!(body["passages"]["characters"], 300);
        assert!(body["passages"]["fields"]
            .as_array()
            .unwrap()
            .contains(&serde_json::json!("structured.cost_sharing_in_network.*")));
        assert_eq!(body["table_results"]["enabled"], false);
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Invalid port makes the request fail before anything is sent
        let client = DiscoveryClient::new(endpoint("http://localhost:99999"), 2).unwrap();
        let query = SearchQuery::new("deductible", "", 1);

        let result = client.search(&query).await;
        assert!(matches!(result, Err(SearchError::Communication(_))));
    }
}
