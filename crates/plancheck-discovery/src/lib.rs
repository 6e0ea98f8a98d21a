//! Plancheck Service Clients
//!
//! Implementations of the `SearchClient` and `AssistantClient` traits from
//! `plancheck-domain`.
//!
//! # Clients
//!
//! - `DiscoveryClient`: document-search query API over HTTP
//! - `AssistantApiClient`: conversational-assistant message API over HTTP
//! - `MockSearchClient` / `MockAssistantClient`: deterministic stand-ins for testing
//!
//! Requests are sent once; failures are reported to the caller, never retried.
//!
//! # Examples
//!
//! ```
//! use plancheck_discovery::MockSearchClient;
//! use plancheck_domain::{DocumentResult, SearchClient, SearchQuery};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let client = MockSearchClient::new(vec![DocumentResult::new("doc-1")]);
//! let results = client.search(&SearchQuery::new("deductible", "", 3)).await.unwrap();
//! assert_eq!(results.len(), 1);
//! assert_eq!(client.call_count(), 1);
//! # }
//! ```

#![warn(missing_docs)]

pub mod assistant;
pub mod discovery;

use async_trait::async_trait;
use plancheck_domain::{AssistantClient, DocumentResult, SearchClient, SearchQuery};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use assistant::{AssistantApiClient, AssistantEndpoint};
pub use discovery::{DiscoveryClient, DiscoveryEndpoint};

/// Errors that can occur while querying the document-search service
#[derive(Error, Debug)]
pub enum SearchError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Service answered with a non-success status
    #[error("Search service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while calling the assistant message API
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Service answered with a non-success status
    #[error("Assistant service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Response body could not be parsed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Mock search client for deterministic testing
///
/// Returns a fixed result set (or a fixed error) without any network calls and
/// records the queries it receives.
#[derive(Debug, Clone)]
pub struct MockSearchClient {
    results: Vec<DocumentResult>,
    failure: Option<String>,
    queries: Arc<Mutex<Vec<SearchQuery>>>,
}

impl MockSearchClient {
    /// Create a mock that returns `results` for every query
    pub fn new(results: Vec<DocumentResult>) -> Self {
        Self {
            results,
            failure: None,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that fails every query with a communication error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            failure: Some(message.into()),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of queries received
    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Most recent query, if any
    pub fn last_query(&self) -> Option<SearchQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

impl Default for MockSearchClient {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    type Error = SearchError;

    async fn search(&self, query: &SearchQuery) -> Result<Vec<DocumentResult>, Self::Error> {
        self.queries.lock().unwrap().push(query.clone());

        match &self.failure {
            Some(message) => Err(SearchError::Communication(message.clone())),
            None => Ok(self.results.clone()),
        }
    }
}

/// Mock assistant client for deterministic testing
#[derive(Debug, Clone)]
pub struct MockAssistantClient {
    response: Value,
    failure: Option<String>,
    messages: Arc<Mutex<Vec<(String, Option<Value>)>>>,
}

impl MockAssistantClient {
    /// Create a mock that answers every message with `response`
    pub fn new(response: Value) -> Self {
        Self {
            response,
            failure: None,
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that fails every message with a communication error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Value::Null,
            failure: Some(message.into()),
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of messages received
    pub fn call_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Most recent message text and context, if any
    pub fn last_message(&self) -> Option<(String, Option<Value>)> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl Default for MockAssistantClient {
    fn default() -> Self {
        Self::new(serde_json::json!({ "output": { "text": ["Default mock response"] } }))
    }
}

#[async_trait]
impl AssistantClient for MockAssistantClient {
    type Error = AssistantError;

    async fn message(&self, text: &str, context: Option<&Value>) -> Result<Value, Self::Error> {
        self.messages
            .lock()
            .unwrap()
            .push((text.to_string(), context.cloned()));

        match &self.failure {
            Some(message) => Err(AssistantError::Communication(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}
