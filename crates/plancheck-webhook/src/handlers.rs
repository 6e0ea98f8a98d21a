//! HTTP request handlers for the webhook service.
//!
//! `POST /processResponse` is the single entry point the assistant front end
//! calls; `GET /health` is for load balancers.

use crate::dispatch::{Route, WebhookRequest};
use crate::providers::ProviderDirectory;
use crate::reply::compose_reply;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use plancheck_discovery::{AssistantError, SearchError};
use plancheck_domain::{AssistantClient, SearchClient, SearchQuery};
use plancheck_resolver::FactResolver;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared document-search client
pub type SharedSearchClient = Arc<dyn SearchClient<Error = SearchError>>;

/// Shared assistant client
pub type SharedAssistantClient = Arc<dyn AssistantClient<Error = AssistantError>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document-search client
    pub search: SharedSearchClient,
    /// Assistant message client
    pub assistant: SharedAssistantClient,
    /// Filter applied to every search
    pub search_filter: String,
    /// Documents requested per search
    pub search_count: u32,
}

impl AppState {
    /// Create state with the default search filter and count
    pub fn new(search: SharedSearchClient, assistant: SharedAssistantClient) -> Self {
        let defaults = crate::config::DiscoverySettings::default();
        Self {
            search,
            assistant,
            search_filter: defaults.filter,
            search_count: defaults.count,
        }
    }

    /// Override the search filter and count
    pub fn with_search_defaults(mut self, filter: impl Into<String>, count: u32) -> Self {
        self.search_filter = filter.into();
        self.search_count = count;
        self
    }
}

/// Body returned by `/processResponse`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    /// `successful`, `success` or `error`
    pub status: String,

    /// Handler payload (assistant response, provider list, or error message)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    /// Sentence for the assistant to say
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_response: Option<String>,

    /// Kind of listing in `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,

    /// Number of records in `data`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_total: Option<usize>,
}

impl WebhookResponse {
    fn successful() -> Self {
        Self {
            status: "successful".to_string(),
            data: None,
            bot_response: None,
            query_type: None,
            record_total: None,
        }
    }

    /// Successful call carrying a data payload
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::successful()
        }
    }

    /// Successful call with an optional assistant sentence
    pub fn with_bot_response(bot_response: Option<String>) -> Self {
        Self {
            bot_response,
            ..Self::successful()
        }
    }

    /// Provider directory listing
    pub fn with_providers(directory: &ProviderDirectory) -> Self {
        Self {
            data: serde_json::to_value(directory).ok(),
            query_type: Some("providers".to_string()),
            record_total: Some(directory.len()),
            ..Self::successful()
        }
    }

    /// Nothing in the payload told us what to do
    pub fn no_params() -> Self {
        Self {
            status: "success".to_string(),
            data: Some(Value::String(
                "Webhook successful. No valid params were provided from Watson to process response."
                    .to_string(),
            )),
            ..Self::successful()
        }
    }

    /// Upstream failure, reported in-band
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            data: Some(Value::String(message.into())),
            ..Self::successful()
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Document search failed
    #[error("{0}")]
    Search(#[from] SearchError),
    /// Assistant call failed
    #[error("{0}")]
    Assistant(#[from] AssistantError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(error = %self, "Upstream request failed");

        // The front end only reads the body, so failures travel in-band.
        let body = Json(WebhookResponse::error(self.to_string()));
        (StatusCode::OK, body).into_response()
    }
}

/// POST /processResponse - Dispatch a webhook call
async fn process_response(
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> Result<Json<WebhookResponse>, AppError> {
    let route = request.route();
    info!(?route, "Processing webhook request");

    if request.wants_log() {
        info!(
            target: "plancheck::insert_log",
            ?route,
            user_message = ?request.user_message,
            discovery_message = ?request.discovery_message,
            entities = ?request.entities,
            "Logged webhook request"
        );
    }

    let response = match route {
        Route::Message => forward_message(&state, &request).await?,
        Route::Discovery => answer_from_documents(&state, &request).await?,
        Route::Providers => WebhookResponse::with_providers(&ProviderDirectory::builtin()),
        Route::Unrecognized => {
            info!("No valid params in webhook request");
            WebhookResponse::no_params()
        }
    };

    Ok(Json(response))
}

async fn forward_message(
    state: &AppState,
    request: &WebhookRequest,
) -> Result<WebhookResponse, AppError> {
    let text = request.user_message.as_deref().unwrap_or_default();
    let reply = state
        .assistant
        .message(text, request.forwarded_context())
        .await?;

    Ok(WebhookResponse::with_data(reply))
}

async fn answer_from_documents(
    state: &AppState,
    request: &WebhookRequest,
) -> Result<WebhookResponse, AppError> {
    let utterance = request.discovery_message.as_deref().unwrap_or_default();
    let query = SearchQuery::new(utterance, state.search_filter.as_str(), state.search_count);

    let results = state.search.search(&query).await?;
    info!(results = results.len(), "Search returned documents");

    let bot_response = request.requested_fact().map(|kind| {
        let result = FactResolver::for_kind(kind).resolve(&results);
        match result.provenance() {
            Some(provenance) => info!(
                fact = kind.label(),
                answer = result.answer().unwrap_or_default(),
                document_id = %provenance.document_id,
                field = %provenance.field,
                "Resolved fact"
            ),
            None => info!(fact = kind.label(), "Fact not found in search results"),
        }
        compose_reply(kind, &result)
    });

    Ok(WebhookResponse::with_bot_response(bot_response))
}

/// GET /health - Liveness check
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/processResponse", post(process_response))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use plancheck_discovery::{MockAssistantClient, MockSearchClient};
    use serde_json::json;
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState {
        AppState::new(
            Arc::new(MockSearchClient::default()),
            Arc::new(MockAssistantClient::default()),
        )
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_process_response_no_params() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/processResponse")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_response_skips_empty_fields() {
        let json = serde_json::to_value(WebhookResponse::with_bot_response(None)).unwrap();
        assert_eq!(json, json!({ "status": "successful" }));
    }

    #[test]
    fn test_error_response_shape() {
        let json = serde_json::to_value(WebhookResponse::error("boom")).unwrap();
        assert_eq!(json, json!({ "status": "error", "data": "boom" }));
    }

    #[test]
    fn test_providers_response_shape() {
        let json =
            serde_json::to_value(WebhookResponse::with_providers(&ProviderDirectory::builtin()))
                .unwrap();
        assert_eq!(json["queryType"], "providers");
        assert_eq!(json["recordTotal"], 5);
        assert_eq!(json["data"]["providers"].as_array().unwrap().len(), 5);
    }
}
