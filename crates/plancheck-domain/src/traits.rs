//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the webhook and the services it
//! calls. HTTP implementations live in `plancheck-discovery`.

use crate::document::DocumentResult;
use async_trait::async_trait;
use serde_json::Value;

/// A natural-language query against the document-search service
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// The user's question, passed through as-is
    pub natural_language_query: String,

    /// Search filter expression (e.g. `document_type::"policy_certificate"`)
    pub filter: String,

    /// Maximum number of documents to return
    pub count: u32,
}

impl SearchQuery {
    /// Create a query
    pub fn new(
        natural_language_query: impl Into<String>,
        filter: impl Into<String>,
        count: u32,
    ) -> Self {
        Self {
            natural_language_query: natural_language_query.into(),
            filter: filter.into(),
            count,
        }
    }
}

/// Trait for document-search backends
///
/// Implemented by the infrastructure layer (plancheck-discovery)
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Error type for search operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a query and return matched documents, most relevant first
    async fn search(&self, query: &SearchQuery) -> Result<Vec<DocumentResult>, Self::Error>;
}

/// Trait for the conversational-assistant message API
///
/// Implemented by the infrastructure layer (plancheck-discovery)
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Error type for assistant operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send a user utterance (with optional conversation context) and return
    /// the assistant's raw response
    async fn message(&self, text: &str, context: Option<&Value>) -> Result<Value, Self::Error>;
}
