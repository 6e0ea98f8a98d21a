//! Provenance tracking for resolved facts

use serde::{Deserialize, Serialize};
use std::fmt;

/// The data path inside a [`DocumentResult`](crate::DocumentResult) that produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProvenanceField {
    /// `structured.cost_sharing_in_network.deductible_individual`
    #[serde(rename = "structured.cost_sharing_in_network.deductible_individual")]
    StructuredDeductibleIndividual,

    /// Body of an in-network section
    #[serde(rename = "sections.body")]
    SectionBody,

    /// A flattened text fragment
    #[serde(rename = "text")]
    Text,

    /// Text of a highlighted passage
    #[serde(rename = "document_passages.passage_text")]
    PassageText,

    /// First answer span of a highlighted passage
    #[serde(rename = "document_passages.answers[0]")]
    FirstPassageAnswer,
}

impl ProvenanceField {
    /// Dotted field path as reported to callers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructuredDeductibleIndividual => {
                "structured.cost_sharing_in_network.deductible_individual"
            }
            Self::SectionBody => "sections.body",
            Self::Text => "text",
            Self::PassageText => "document_passages.passage_text",
            Self::FirstPassageAnswer => "document_passages.answers[0]",
        }
    }
}

impl fmt::Display for ProvenanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved value came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Identifier of the source document, as given by the search service
    pub document_id: String,

    /// Field path within that document
    pub field: ProvenanceField,
}

impl Provenance {
    /// Create a new provenance record
    pub fn new(document_id: impl Into<String>, field: ProvenanceField) -> Self {
        Self {
            document_id: document_id.into(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_paths_match_serde_names() {
        let fields = [
            ProvenanceField::StructuredDeductibleIndividual,
            ProvenanceField::SectionBody,
            ProvenanceField::Text,
            ProvenanceField::PassageText,
            ProvenanceField::FirstPassageAnswer,
        ];

        for field in fields {
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, serde_json::Value::String(field.as_str().to_string()));
        }
    }

    #[test]
    fn test_provenance_serialization() {
        let provenance = Provenance::new("doc-42", ProvenanceField::SectionBody);
        let json = serde_json::to_value(&provenance).unwrap();

        assert_eq!(json["document_id"], "doc-42");
        assert_eq!(json["field"], "sections.body");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ProvenanceField::FirstPassageAnswer.to_string(),
            "document_passages.answers[0]"
        );
    }
}
