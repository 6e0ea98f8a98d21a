//! Ordered strategy evaluation

use crate::strategy::{
    ExtractionStrategy, PassageContextStrategy, SectionTextStrategy, StructuredFieldStrategy,
};
use plancheck_domain::{DocumentResult, ExtractionResult, FactKind};
use std::fmt;
use tracing::debug;

/// Resolves one fact from search results using strategies in precedence order.
///
/// Every strategy is tried against every document (in the order received)
/// before the next strategy runs. The first hit wins; there is no scoring or
/// merging between strategies.
pub struct FactResolver {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl FactResolver {
    /// Build the standard strategy set for a fact kind
    pub fn for_kind(kind: FactKind) -> Self {
        match kind {
            FactKind::InNetworkDeductible => Self::with_strategies(vec![
                Box::new(StructuredFieldStrategy::in_network_deductible()),
                Box::new(SectionTextStrategy),
                Box::new(PassageContextStrategy),
            ]),
        }
    }

    /// Build a resolver from an explicit, ordered strategy list
    pub fn with_strategies(strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategy names in evaluation order
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve the fact, or return an empty result if no strategy finds it
    pub fn resolve(&self, results: &[DocumentResult]) -> ExtractionResult {
        for strategy in &self.strategies {
            for document in results {
                if let Some(fact) = strategy.attempt(document) {
                    debug!(
                        strategy = strategy.name(),
                        document_id = %fact.provenance.document_id,
                        field = %fact.provenance.field,
                        answer = %fact.answer,
                        "Resolved fact"
                    );
                    return ExtractionResult::found(fact);
                }
            }
            debug!(strategy = strategy.name(), "Strategy found nothing");
        }

        debug!(documents = results.len(), "No strategy resolved the fact");
        ExtractionResult::not_found()
    }
}

impl fmt::Debug for FactResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactResolver")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}
