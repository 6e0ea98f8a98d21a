//! Search-result documents
//!
//! These types mirror the JSON returned by the document-search service. Every
//! field is optional on the wire, and a field carrying an unexpected JSON type is
//! treated as if it were absent instead of rejecting the whole payload.

use crate::lenient::{or_default, seq};
use serde::Deserialize;
use serde_json::Value;

/// Top-level search response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    /// Matched documents, most relevant first
    #[serde(default, deserialize_with = "seq")]
    pub results: Vec<DocumentResult>,
}

/// One matched document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DocumentResult {
    /// Opaque document identifier
    #[serde(default, deserialize_with = "or_default")]
    pub document_id: String,

    /// Typed domain fields (e.g. `cost_sharing_in_network.deductible_individual`)
    #[serde(default, deserialize_with = "or_default")]
    pub structured: Option<Value>,

    /// Document sections in reading order
    #[serde(default, deserialize_with = "seq")]
    pub sections: Vec<Section>,

    /// Flattened text fragments in reading order
    #[serde(default, deserialize_with = "seq")]
    pub text: Vec<String>,

    /// Highlighted passages in the order the search service ranked them
    #[serde(default, deserialize_with = "seq")]
    pub document_passages: Vec<Passage>,
}

/// A headed block of document text
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Section {
    /// Section heading
    #[serde(default, deserialize_with = "or_default")]
    pub heading: Option<String>,

    /// Section body
    #[serde(default, deserialize_with = "or_default")]
    pub body: Option<String>,
}

/// A search-highlighted excerpt
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Passage {
    /// Excerpt text
    #[serde(default, deserialize_with = "or_default")]
    pub passage_text: String,

    /// Candidate answer spans, best first
    #[serde(default, deserialize_with = "seq")]
    pub answers: Vec<Answer>,
}

/// A candidate answer span inside a passage
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Answer {
    /// Unvalidated answer text
    #[serde(default, deserialize_with = "or_default")]
    pub answer_text: Option<String>,
}

impl DocumentResult {
    /// Create an empty document with the given identifier
    pub fn new(document_id: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            ..Self::default()
        }
    }

    /// Attach structured fields
    pub fn with_structured(mut self, structured: Value) -> Self {
        self.structured = Some(structured);
        self
    }

    /// Append a section
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a flattened text fragment
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    /// Append a passage
    pub fn with_passage(mut self, passage: Passage) -> Self {
        self.document_passages.push(passage);
        self
    }

    /// Look up a nested structured field by object keys.
    ///
    /// Returns `None` when any step is missing, not an object, or the final
    /// value is JSON `null`.
    pub fn structured_field(&self, path: &[&str]) -> Option<&Value> {
        let mut current = self.structured.as_ref()?;
        for key in path {
            current = current.as_object()?.get(*key)?;
        }
        if current.is_null() {
            None
        } else {
            Some(current)
        }
    }
}

impl Section {
    /// Create a section with both heading and body
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            body: Some(body.into()),
        }
    }

    /// Create a section that has a body but no heading
    pub fn untitled(body: impl Into<String>) -> Self {
        Self {
            heading: None,
            body: Some(body.into()),
        }
    }

    /// Heading text, empty when absent
    pub fn heading_str(&self) -> &str {
        self.heading.as_deref().unwrap_or("")
    }

    /// Body text, empty when absent
    pub fn body_str(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }
}

impl Passage {
    /// Create a passage without answer spans
    pub fn new(passage_text: impl Into<String>) -> Self {
        Self {
            passage_text: passage_text.into(),
            answers: Vec::new(),
        }
    }

    /// Append an answer span
    pub fn with_answer(mut self, answer_text: impl Into<String>) -> Self {
        self.answers.push(Answer {
            answer_text: Some(answer_text.into()),
        });
        self
    }

    /// Text of the top-ranked answer span, if any and non-empty
    pub fn first_answer(&self) -> Option<&str> {
        self.answers
            .first()
            .and_then(|answer| answer.answer_text.as_deref())
            .filter(|text| !text.is_empty())
    }
}
