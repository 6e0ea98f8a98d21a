//! Plancheck Resolver
//!
//! Resolves a single normalized fact from a collection of search results.
//!
//! # Overview
//!
//! Search results mix typed fields, free-text sections and highlighted
//! passages, and any of them may be missing. The resolver applies an ordered
//! list of extraction strategies, from most to least trustworthy, and returns
//! the first value found together with the document and field it came from.
//!
//! # Architecture
//!
//! ```text
//! [DocumentResult] → Structured field → Section/Text pattern → Passage context → ExtractionResult
//! ```
//!
//! Each strategy walks every document (in the order received) before the next
//! strategy is tried. Nothing here fails: missing data just means "not found".
//!
//! # Example Usage
//!
//! ```
//! use plancheck_domain::{DocumentResult, FactKind, ProvenanceField, Section};
//! use plancheck_resolver::FactResolver;
//!
//! let results = vec![DocumentResult::new("doc-1").with_section(Section::new(
//!     "In-Network Benefits",
//!     "Individual Deductible: $1,234",
//! ))];
//!
//! let resolver = FactResolver::for_kind(FactKind::InNetworkDeductible);
//! let result = resolver.resolve(&results);
//!
//! assert_eq!(result.answer(), Some("$1,234"));
//! assert_eq!(result.provenance().unwrap().field, ProvenanceField::SectionBody);
//! ```

#![warn(missing_docs)]

mod currency;
mod patterns;
mod resolver;
mod strategy;


pub use currency::{format_usd, parse_amount};
pub use resolver::FactResolver;
pub use strategy::{
    ExtractionStrategy, PassageContextStrategy, SectionTextStrategy, StructuredFieldStrategy,
};
