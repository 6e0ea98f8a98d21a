//! Extraction strategies
//!
//! A strategy looks at one document and either produces a resolved fact or
//! passes. Strategies never fail; data they cannot use is skipped.

use crate::currency::{format_usd, parse_amount, usd_from_digits};
use crate::patterns::{
    has_in_network_label, individual_deductible, mentions_deductible, mentions_in_network,
};
use plancheck_domain::{DocumentResult, Provenance, ProvenanceField, ResolvedFact, Section};
use tracing::debug;

/// One way of pulling a fact out of a document
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Try to resolve the fact from a single document
    fn attempt(&self, document: &DocumentResult) -> Option<ResolvedFact>;
}

fn resolved(document: &DocumentResult, answer: String, field: ProvenanceField) -> ResolvedFact {
    ResolvedFact::new(answer, Provenance::new(document.document_id.clone(), field))
}

/// Reads a typed value from the document's structured fields
#[derive(Debug, Clone)]
pub struct StructuredFieldStrategy {
    path: &'static [&'static str],
    field: ProvenanceField,
}

impl StructuredFieldStrategy {
    /// Path of the in-network individual deductible under `structured`
    pub const IN_NETWORK_DEDUCTIBLE_PATH: &'static [&'static str] =
        &["cost_sharing_in_network", "deductible_individual"];

    /// Create a strategy for an arbitrary structured path
    pub fn new(path: &'static [&'static str], field: ProvenanceField) -> Self {
        Self { path, field }
    }

    /// `structured.cost_sharing_in_network.deductible_individual`
    pub fn in_network_deductible() -> Self {
        Self::new(
            Self::IN_NETWORK_DEDUCTIBLE_PATH,
            ProvenanceField::StructuredDeductibleIndividual,
        )
    }
}

impl ExtractionStrategy for StructuredFieldStrategy {
    fn name(&self) -> &'static str {
        "structured_field"
    }

    fn attempt(&self, document: &DocumentResult) -> Option<ResolvedFact> {
        let value = document.structured_field(self.path)?;
        match parse_amount(value) {
            Some(amount) => Some(resolved(document, format_usd(amount), self.field)),
            None => {
                debug!(
                    document_id = %document.document_id,
                    field = %self.field,
                    "Structured value is not a usable amount"
                );
                None
            }
        }
    }
}

/// Finds `Individual Deductible: $N` in in-network sections, then in
/// in-network text fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionTextStrategy;

impl SectionTextStrategy {
    fn is_in_network_section(section: &Section) -> bool {
        mentions_in_network(section.heading_str()) || has_in_network_label(section.body_str())
    }
}

impl ExtractionStrategy for SectionTextStrategy {
    fn name(&self) -> &'static str {
        "section_text"
    }

    fn attempt(&self, document: &DocumentResult) -> Option<ResolvedFact> {
        let from_sections = document
            .sections
            .iter()
            .filter(|section| Self::is_in_network_section(section))
            .find_map(|section| individual_deductible(section.body_str()))
            .map(|answer| (answer, ProvenanceField::SectionBody));

        let found = from_sections.or_else(|| {
            document
                .text
                .iter()
                .filter(|fragment| mentions_in_network(fragment))
                .find_map(|fragment| individual_deductible(fragment))
                .map(|answer| (answer, ProvenanceField::Text))
        });

        found.map(|(answer, field)| resolved(document, answer, field))
    }
}

/// Last resort: passages that mention both "in-network" and "deductible".
///
/// The passage text is tried with the deductible pattern first; failing that,
/// the digits of the top-ranked answer span are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassageContextStrategy;

impl ExtractionStrategy for PassageContextStrategy {
    fn name(&self) -> &'static str {
        "passage_context"
    }

    fn attempt(&self, document: &DocumentResult) -> Option<ResolvedFact> {
        document
            .document_passages
            .iter()
            .filter(|passage| {
                mentions_in_network(&passage.passage_text)
                    && mentions_deductible(&passage.passage_text)
            })
            .find_map(|passage| {
                if let Some(answer) = individual_deductible(&passage.passage_text) {
                    return Some((answer, ProvenanceField::PassageText));
                }

                let span = passage.first_answer()?;
                match usd_from_digits(span) {
                    Some(answer) => Some((answer, ProvenanceField::FirstPassageAnswer)),
                    None => {
                        debug!(
                            document_id = %document.document_id,
                            answer = span,
                            "Rejected answer span without digits"
                        );
                        None
                    }
                }
            })
            .map(|(answer, field)| resolved(document, answer, field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plancheck_domain::Passage;
    use serde_json::json;

    #[test]
    fn test_structured_strategy_reads_nested_value() {
        let doc = DocumentResult::new("doc-1").with_structured(json!({
            "cost_sharing_in_network": { "deductible_individual": 1500 }
        }));

        let fact = StructuredFieldStrategy::in_network_deductible()
            .attempt(&doc)
            .unwrap();
        assert_eq!(fact.answer, "$1,500");
        assert_eq!(fact.provenance.document_id, "doc-1");
        assert_eq!(
            fact.provenance.field,
            ProvenanceField::StructuredDeductibleIndividual
        );
    }

    #[test]
    fn test_structured_strategy_ignores_out_of_network() {
        let doc = DocumentResult::new("doc-1").with_structured(json!({
            "cost_sharing_out_of_network": { "deductible_individual": 3000 }
        }));

        assert!(StructuredFieldStrategy::in_network_deductible()
            .attempt(&doc)
            .is_none());
    }

    #[test]
    fn test_structured_strategy_rejects_unusable_value() {
        let doc = DocumentResult::new("doc-1").with_structured(json!({
            "cost_sharing_in_network": { "deductible_individual": "varies" }
        }));

        assert!(StructuredFieldStrategy::in_network_deductible()
            .attempt(&doc)
            .is_none());
    }

    #[test]
    fn test_section_qualifies_by_body_label() {
        let doc = DocumentResult::new("doc-2").with_section(Section::new(
            "Cost Sharing",
            "In-Network: Individual Deductible: $750",
        ));

        let fact = SectionTextStrategy.attempt(&doc).unwrap();
        assert_eq!(fact.answer, "$750");
        assert_eq!(fact.provenance.field, ProvenanceField::SectionBody);
    }

    #[test]
    fn test_section_without_marker_is_skipped() {
        let doc = DocumentResult::new("doc-2")
            .with_section(Section::new("Out-of-Network", "Individual Deductible: $3,000"))
            .with_section(Section::new("In-Network", "Individual Deductible: $1,000"));

        let fact = SectionTextStrategy.attempt(&doc).unwrap();
        assert_eq!(fact.answer, "$1,000");
    }

    #[test]
    fn test_qualifying_section_without_amount_falls_through() {
        let doc = DocumentResult::new("doc-2")
            .with_section(Section::new("In-Network", "See schedule of benefits."))
            .with_section(Section::untitled("In-Network: Individual Deductible: $900"));

        let fact = SectionTextStrategy.attempt(&doc).unwrap();
        assert_eq!(fact.answer, "$900");
        assert_eq!(fact.provenance.field, ProvenanceField::SectionBody);
    }

    #[test]
    fn test_text_fragments_used_when_sections_miss() {
        let doc = DocumentResult::new("doc-3")
            .with_section(Section::new("Overview", "Individual Deductible: $5"))
            .with_text("Out of pocket maximum: $6,000")
            .with_text("In Network Individual Deductible: $1,100");

        let fact = SectionTextStrategy.attempt(&doc).unwrap();
        assert_eq!(fact.answer, "$1,100");
        assert_eq!(fact.provenance.field, ProvenanceField::Text);
    }

    #[test]
    fn test_passage_requires_both_markers() {
        let doc = DocumentResult::new("doc-4")
            .with_passage(Passage::new("Individual Deductible: $400 (in-network)").with_answer("$400"))
            .with_passage(Passage::new("In-network copay is $20").with_answer("$20"));

        let fact = PassageContextStrategy.attempt(&doc).unwrap();
        assert_eq!(fact.answer, "$400");
        assert_eq!(fact.provenance.field, ProvenanceField::PassageText);

        let doc = DocumentResult::new("doc-5")
            .with_passage(Passage::new("In-network copay is $20").with_answer("$20"));
        assert!(PassageContextStrategy.attempt(&doc).is_none());
    }

    #[test]
    fn test_passage_answer_without_digits_moves_on() {
        let doc = DocumentResult::new("doc-6")
            .with_passage(
                Passage::new("Your in-network deductible applies first").with_answer("per year"),
            )
            .with_passage(
                Passage::new("The deductible for in network care is shown below")
                    .with_answer("$1,250 each year"),
            );

        let fact = PassageContextStrategy.attempt(&doc).unwrap();
        assert_eq!(fact.answer, "$1,250");
        assert_eq!(fact.provenance.field, ProvenanceField::FirstPassageAnswer);
    }
}
