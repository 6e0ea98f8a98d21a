//! Plancheck Domain Layer
//!
//! This crate contains the data model shared by every other Plancheck crate.
//! It defines the shape of search results coming back from the document-search
//! service, the resolved-fact output with its provenance, and the trait
//! interfaces for the external services the webhook talks to.
//!
//! ## Key Concepts
//!
//! - **DocumentResult**: One matched policy document with structured fields,
//!   sections, flattened text and highlighted passages, any of which may be absent
//! - **ExtractionResult**: Either a fully resolved fact (answer + provenance) or nothing
//! - **Provenance**: Which document and which field path produced an answer
//! - **FactKind**: The kinds of fact the resolver knows how to find
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - HTTP implementations of the traits live in `plancheck-discovery`
//! - Resolution logic lives in `plancheck-resolver`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod extraction;
pub mod lenient;
pub mod provenance;
pub mod traits;

// Re-exports for convenience
pub use document::{Answer, DocumentResult, Passage, SearchResponse, Section};
pub use extraction::{ExtractionResult, FactKind, ResolvedFact};
pub use provenance::{Provenance, ProvenanceField};
pub use traits::{AssistantClient, SearchClient, SearchQuery};
