//! Parentèle Extractor
//!
//! Turns the free-text relation phrases of historical acts into structured
//! relation extractions.
//!
//! # Overview
//!
//! Clerks recorded how witnesses, godparents and declarants were related to
//! the principal parties in short French phrases: "oncle de l'époux",
//! "fille de M. Martin", "tante des époux". The Extractor segments such a
//! phrase into fragments, cuts each fragment at its possessive determinant
//! and resolves the target against the other actors of the same act.
//!
//! # Architecture
//!
//! ```text
//! lien → normalize → couple expansion / implicit target → fragments
//!      → split at determinant → relation word + precision
//!      → titles / role / name → target actor + statut
//! ```
//!
//! Every phrase yields a result: fragments that cannot be parsed come back
//! with statut `erreur` and the offending text as mention, so they can be
//! reviewed by hand.
//!
//! # Example Usage
//!
//! ```
//! use parentele_domain::{ActeContext, ActeScope, ActeType, Actor, ActorId, Statut};
//! use parentele_extractor::Extractor;
//!
//! let epoux = Actor {
//!     id: ActorId::new("a1"),
//!     acte_id: "42".to_string(),
//!     source_table: "actes_mariage".to_string(),
//!     nom: Some("Durand".to_string()),
//!     prenom: Some("Pierre".to_string()),
//!     qualite: None,
//!     role: Some("époux".to_string()),
//!     acte_type: ActeType::Mariage,
//! };
//! let context = ActeContext::new(ActeScope::new("42", "actes_mariage"), ActeType::Mariage);
//!
//! let extractor = Extractor::default();
//! let results = extractor.extract("Oncle de l'époux", &context, &[epoux]);
//!
//! assert_eq!(results[0].relation_type.as_deref(), Some("oncle"));
//! assert_eq!(results[0].statut, Statut::Unique);
//! ```

#![warn(missing_docs)]

mod error;
mod extractor;
mod lexicon;
pub mod text;

#[cfg(test)]
mod tests;

pub use error::ExtractorError;
pub use extractor::Extractor;
pub use lexicon::Lexicon;
