//! Parentèle Synthesizer
//!
//! Produces relations that no phrase states directly: baseline relations
//! from declared roles, and implicit relations deduced by rules over an
//! act's relation graph.
//!
//! # Architecture
//!
//! ```text
//! actors ──► RoleTable::derive ──► explicit rows ─┐
//!                                                  ├─► RelationGraph ──► deduce(rules) ──► implicit rows
//! parsed phrases ─────────────────► explicit rows ─┘
//! ```
//!
//! # Example Usage
//!
//! ```
//! use parentele_domain::{ActeScope, ActeType, Actor, ActorId, RelationMode};
//! use parentele_synthesizer::{deduce, derive_from_roles, RelationGraph, RuleSet};
//!
//! let actor = |id: &str, role: &str| Actor {
//!     id: ActorId::new(id),
//!     acte_id: "1".to_string(),
//!     source_table: "actes".to_string(),
//!     nom: None,
//!     prenom: None,
//!     qualite: None,
//!     role: Some(role.to_string()),
//!     acte_type: ActeType::Naissance,
//! };
//! let scope = ActeScope::new("1", "actes");
//! let actors = vec![actor("e", "enfant"), actor("p", "père"), actor("m", "mère")];
//!
//! let explicit = derive_from_roles(&actors, &scope);
//! let graph = RelationGraph::build(scope, &actors, &explicit);
//! let implicit = deduce(&graph, &explicit, RuleSet::default().rules());
//!
//! // Spouses are already declared by role, so nothing new is deduced
//! assert!(implicit.iter().all(|r| r.relation_mode == RelationMode::Implicite));
//! assert!(implicit.is_empty());
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod graph;
mod roles;
mod rules;

pub use engine::{deduce, RULE_MENTION_PREFIX};
pub use error::SynthesizerError;
pub use graph::{Edge, RelationGraph};
pub use roles::{derive_from_roles, RoleLink, RoleTable};
pub use rules::{Bindings, Conclusion, Condition, OneOrMany, RelationRule, RuleSet, Var};
