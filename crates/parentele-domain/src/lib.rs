//! Parentèle Domain Layer
//!
//! Core vocabulary shared by every other crate: actors declared on a
//! historical act, the free-text relation candidates attached to them, the
//! transient extraction results produced by the segmenter, and the persisted
//! relation rows ("previews") that form each act's kinship graph.
//!
//! ## Key Concepts
//!
//! - **Acte**: one civil-status or notarial record, identified by an
//!   [`ActeScope`] (`acte_id` + `source_table`)
//! - **Actor**: a person mentioned in an act, with a role ("père", "témoin", ...)
//! - **Lien**: free-text phrase a transcriber typed for one actor
//! - **Statut**: resolution outcome of a parsed or derived relation
//! - **Relation mode**: explicit (text or role table) or implicit (rule engine)
//!
//! ## Architecture
//!
//! This crate holds plain data and the [`traits::RelationStore`] boundary.
//! Parsing, derivation and persistence live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acte;
pub mod actor;
pub mod normalize;
pub mod relation;
pub mod traits;

// Re-exports for convenience
pub use acte::{ActeContext, ActeScope, ActeType};
pub use actor::{Actor, ActorId, SANS_NOM};
pub use normalize::normalize;
pub use relation::{
    EdgeKey, RelationCandidate, RelationExtraction, RelationMode, RelationPreview, Statut,
    ROLE_MENTION,
};
pub use traits::RelationStore;
