//! Conversational-assistant message client
//!
//! Forwards a user utterance (and the conversation context the front end keeps)
//! to the assistant's v1 `message` endpoint and hands back the raw response.

use crate::AssistantError;
use async_trait::async_trait;
use plancheck_domain::AssistantClient;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default assistant API version
pub const DEFAULT_VERSION: &str = "2019-02-28";

/// Where and how to reach the assistant service
#[derive(Debug, Clone)]
pub struct AssistantEndpoint {
    /// Service root (e.g. `https://api.us-south.assistant.watson.cloud.ibm.com`)
    pub base_url: String,
    /// Workspace (skill) that handles the conversation
    pub skill_id: String,
    /// API version date
    pub version: String,
    /// Pre-encoded basic-auth credentials
    pub auth: String,
}

impl AssistantEndpoint {
    /// Full URL of the message endpoint
    pub fn message_url(&self) -> String {
        format!(
            "{}/v1/workspaces/{}/message?version={}",
            self.base_url.trim_end_matches('/'),
            self.skill_id,
            self.version
        )
    }
}

#[derive(Debug, Serialize)]
struct MessageInput<'a> {
    text: &'a str,
}

/// Request body for the message API
#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    input: MessageInput<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a Value>,
}

/// HTTP client for the assistant message API
pub struct AssistantApiClient {
    endpoint: AssistantEndpoint,
    client: reqwest::Client,
}

impl AssistantApiClient {
    /// Create a client with the given request timeout
    pub fn new(endpoint: AssistantEndpoint, timeout_secs: u64) -> Result<Self, AssistantError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                AssistantError::Communication(format!("Failed to build client: {}", e))
            })?;

        Ok(Self { endpoint, client })
    }

    /// Send one message turn
    pub async fn send(&self, text: &str, context: Option<&Value>) -> Result<Value, AssistantError> {
        let url = self.endpoint.message_url();
        let body = MessageRequest {
            input: MessageInput { text },
            context,
        };

        debug!(%url, has_context = context.is_some(), "Sending assistant message");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", self.endpoint.auth))
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(%status, "Assistant service returned an error");
            return Err(AssistantError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        response.json::<Value>().await.map_err(|e| {
            AssistantError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl AssistantClient for AssistantApiClient {
    type Error = AssistantError;

    async fn message(&self, text: &str, context: Option<&Value>) -> Result<Value, Self::Error> {
        self.send(text, context).await
    }
}
