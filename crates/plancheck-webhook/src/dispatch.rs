//! Webhook payload and routing decision
//!
//! The assistant front end posts one JSON shape for every kind of call; which
//! handler runs depends on which field is present. A field of the wrong type is
//! treated as absent.

use plancheck_domain::lenient::{or_default, seq_or_default};
use plancheck_domain::FactKind;
use serde::Deserialize;
use serde_json::Value;

/// Incoming webhook payload. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// `"message"` marks a chat turn to forward to the assistant
    #[serde(default)]
    pub data: Option<Value>,

    /// User utterance for a chat turn
    #[serde(default, deserialize_with = "or_default")]
    pub user_message: Option<String>,

    /// Conversation context kept by the front end
    #[serde(default)]
    pub context: Option<Value>,

    /// Question to answer from policy documents
    #[serde(default, deserialize_with = "or_default")]
    pub discovery_message: Option<String>,

    /// Entities the assistant recognised in the question, in the order given
    #[serde(default, deserialize_with = "seq_or_default")]
    pub entities: Vec<EntityRef>,

    /// Request for the provider directory
    #[serde(default)]
    pub providers: Option<Value>,

    /// Ask for the request to be logged
    #[serde(default)]
    pub insert_log: Option<Value>,
}

/// An entity recognised by the assistant
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntityRef {
    /// Entity name (e.g. `insurance_item`)
    #[serde(default, deserialize_with = "or_default")]
    pub entity: String,

    /// Entity value (e.g. `in_network_deductible`)
    #[serde(default, deserialize_with = "or_default")]
    pub value: String,
}

/// Which handler a request goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Forward a chat turn to the assistant
    Message,
    /// Answer a question from policy documents
    Discovery,
    /// Return the provider directory
    Providers,
    /// Nothing recognisable in the payload
    Unrecognized,
}

impl WebhookRequest {
    /// Pick the handler. The first matching rule wins.
    pub fn route(&self) -> Route {
        if self.data.as_ref().is_some_and(|data| data == "message") {
            Route::Message
        } else if self
            .discovery_message
            .as_deref()
            .is_some_and(|message| !message.is_empty())
        {
            Route::Discovery
        } else if self.providers.as_ref().is_some_and(is_truthy) {
            Route::Providers
        } else {
            Route::Unrecognized
        }
    }

    /// Whether the caller asked for this request to be logged
    pub fn wants_log(&self) -> bool {
        self.insert_log.as_ref().is_some_and(is_truthy)
    }

    /// Fact requested by the first recognised entity, if it is one we resolve
    pub fn requested_fact(&self) -> Option<FactKind> {
        let first = self.entities.first()?;
        FactKind::from_entity(&first.entity, &first.value)
    }

    /// Conversation context to forward, if the front end sent a truthy one
    pub fn forwarded_context(&self) -> Option<&Value> {
        self.context.as_ref().filter(|context| is_truthy(context))
    }
}

/// Loose truthiness used by the front end's flags
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
