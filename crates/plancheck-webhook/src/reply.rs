//! Sentences sent back to the member

use plancheck_domain::{ExtractionResult, FactKind};

/// Compose the assistant's reply for a resolved (or unresolved) fact
pub fn compose_reply(kind: FactKind, result: &ExtractionResult) -> String {
    match result.answer() {
        Some(answer) => format!("Your {} is {}.", kind.label(), answer),
        None => format!(
            "I couldn't find your {} in your policy documents.",
            kind.label()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plancheck_domain::{Provenance, ProvenanceField, ResolvedFact};

    #[test]
    fn test_found_reply() {
        let result = ExtractionResult::found(ResolvedFact::new(
            "$1,500",
            Provenance::new("doc", ProvenanceField::Text),
        ));
        assert_eq!(
            compose_reply(FactKind::InNetworkDeductible, &result),
            "Your in-network deductible is $1,500."
        );
    }

    #[test]
    fn test_not_found_reply() {
        assert_eq!(
            compose_reply(FactKind::InNetworkDeductible, &ExtractionResult::not_found()),
            "I couldn't find your in-network deductible in your policy documents."
        );
    }
}
