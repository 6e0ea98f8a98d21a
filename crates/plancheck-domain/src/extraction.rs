//! Resolved facts and the resolution outcome

use crate::provenance::Provenance;
use serde::{Serialize, Serializer};

/// The kinds of fact the resolver can look for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKind {
    /// In-network individual deductible amount
    InNetworkDeductible,
}

impl FactKind {
    /// Map an assistant entity (name + value) to a fact kind
    pub fn from_entity(entity: &str, value: &str) -> Option<Self> {
        match (entity, value) {
            ("insurance_item", "in_network_deductible") => Some(Self::InNetworkDeductible),
            _ => None,
        }
    }

    /// Human-readable name used in replies
    pub fn label(&self) -> &'static str {
        match self {
            Self::InNetworkDeductible => "in-network deductible",
        }
    }
}

/// A successfully resolved fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFact {
    /// Formatted answer (e.g. `"$1,500"`)
    pub answer: String,

    /// Where the answer came from
    pub provenance: Provenance,
}

impl ResolvedFact {
    /// Create a resolved fact
    pub fn new(answer: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            answer: answer.into(),
            provenance,
        }
    }
}

/// Outcome of one resolution call.
///
/// Either both answer and provenance are present, or neither is. Serializes as
/// `{"answer": ..., "provenance": ...}` with `null` for both when nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    fact: Option<ResolvedFact>,
}

impl ExtractionResult {
    /// A result carrying a resolved fact
    pub fn found(fact: ResolvedFact) -> Self {
        Self { fact: Some(fact) }
    }

    /// The empty result
    pub fn not_found() -> Self {
        Self { fact: None }
    }

    /// Whether a fact was resolved
    pub fn is_found(&self) -> bool {
        self.fact.is_some()
    }

    /// Formatted answer, if found
    pub fn answer(&self) -> Option<&str> {
        self.fact.as_ref().map(|fact| fact.answer.as_str())
    }

    /// Provenance, if found
    pub fn provenance(&self) -> Option<&Provenance> {
        self.fact.as_ref().map(|fact| &fact.provenance)
    }
}

impl From<Option<ResolvedFact>> for ExtractionResult {
    fn from(fact: Option<ResolvedFact>) -> Self {
        Self { fact }
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            answer: Option<&'a str>,
            provenance: Option<&'a Provenance>,
        }

        Wire {
            answer: self.answer(),
            provenance: self.provenance(),
        }
        .serialize(serializer)
    }
}
