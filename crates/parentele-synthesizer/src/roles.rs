//! Baseline relations derived from declared roles alone
//!
//! A [`RoleTable`] lists `(role_source, role_cible, relation_type)` triples.
//! Every ordered pair of actors whose roles match an entry yields one
//! explicit relation, independent of any free text.

use crate::error::SynthesizerError;
use parentele_domain::{
    normalize, ActeScope, Actor, EdgeKey, RelationMode, RelationPreview, Statut, ROLE_MENTION,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// One role pairing: an actor with `role_source` is `relation_type` of the
/// actor with `role_cible`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleLink {
    /// Role of the source actor
    pub role_source: String,

    /// Role of the target actor
    pub role_cible: String,

    /// Relation emitted from source to target
    pub relation_type: String,
}

impl RoleLink {
    fn new(role_source: &str, role_cible: &str, relation_type: &str) -> Self {
        Self {
            role_source: role_source.to_string(),
            role_cible: role_cible.to_string(),
            relation_type: relation_type.to_string(),
        }
    }
}

/// Table of role pairings
///
/// The table is not symmetrized: `(enfant, père, enfant)` says nothing about
/// the père, which needs its own `(père, enfant, père)` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleTable {
    /// Role pairings, applied in order
    #[serde(default)]
    pub links: Vec<RoleLink>,
}

impl Default for RoleTable {
    /// Parents, children and spouses of birth, marriage and legitimation acts
    fn default() -> Self {
        let links = [
            // naissance
            ("enfant", "père", "enfant"),
            ("enfant", "mère", "enfant"),
            ("père", "enfant", "père"),
            ("mère", "enfant", "mère"),
            ("père", "mère", "époux"),
            ("mère", "père", "épouse"),
            // mariage
            ("époux", "épouse", "époux"),
            ("épouse", "époux", "épouse"),
            ("père de l'époux", "époux", "père"),
            ("mère de l'époux", "époux", "mère"),
            ("père de l'épouse", "épouse", "père"),
            ("mère de l'épouse", "épouse", "mère"),
            ("époux", "père de l'époux", "enfant"),
            ("époux", "mère de l'époux", "enfant"),
            ("épouse", "père de l'épouse", "enfant"),
            ("épouse", "mère de l'épouse", "enfant"),
            // légitimation
            ("enfant légitimé", "époux", "enfant"),
            ("enfant légitimé", "épouse", "enfant"),
            ("époux", "enfant légitimé", "père"),
            ("épouse", "enfant légitimé", "mère"),
        ];

        Self {
            links: links
                .iter()
                .map(|(source, cible, relation_type)| RoleLink::new(source, cible, relation_type))
                .collect(),
        }
    }
}

impl RoleTable {
    /// Load a role table from TOML (`[[links]]` entries)
    pub fn from_toml(toml_str: &str) -> Result<Self, SynthesizerError> {
        let table: RoleTable = toml::from_str(toml_str)?;
        let table = table.normalized();
        table.validate()?;
        Ok(table)
    }

    /// Serialize the table to TOML
    pub fn to_toml(&self) -> Result<String, SynthesizerError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the table
    pub fn validate(&self) -> Result<(), SynthesizerError> {
        for link in &self.links {
            if link.role_source.is_empty()
                || link.role_cible.is_empty()
                || link.relation_type.is_empty()
            {
                return Err(SynthesizerError::InvalidRoleTable(format!(
                    "blank field in ({}, {}, {})",
                    link.role_source, link.role_cible, link.relation_type
                )));
            }
        }
        Ok(())
    }

    /// Normalize every role and relation type
    pub fn normalized(self) -> Self {
        Self {
            links: self
                .links
                .into_iter()
                .map(|link| RoleLink {
                    role_source: normalize(&link.role_source),
                    role_cible: normalize(&link.role_cible),
                    relation_type: normalize(&link.relation_type),
                })
                .collect(),
        }
    }

    /// Derive explicit relations for every ordered pair of distinct actors of
    /// `scope` whose roles match a link. Actors outside the scope are ignored
    /// and each `(source, cible, type)` triple is emitted once.
    pub fn derive(&self, actors: &[Actor], scope: &ActeScope) -> Vec<RelationPreview> {
        let in_scope: Vec<(&Actor, String)> = actors
            .iter()
            .filter(|actor| actor.belongs_to(scope))
            .map(|actor| (actor, normalize(actor.role_str())))
            .collect();

        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for (source, source_role) in &in_scope {
            for (cible, cible_role) in &in_scope {
                if source.id == cible.id {
                    continue;
                }
                for link in &self.links {
                    if link.role_source != *source_role || link.role_cible != *cible_role {
                        continue;
                    }
                    let key = EdgeKey::new(source.id.clone(), cible.id.clone(), &link.relation_type);
                    if !seen.insert(key) {
                        continue;
                    }
                    rows.push(RelationPreview {
                        acte_id: scope.acte_id.clone(),
                        source_table: scope.source_table.clone(),
                        acteur_source_id: source.id.clone(),
                        acteur_source_role: source.role.clone(),
                        acteur_cible_id: Some(cible.id.clone()),
                        acteur_cible_role: cible.role.clone(),
                        relation_type: Some(link.relation_type.clone()),
                        relation_mode: RelationMode::Explicite,
                        relation_precision: None,
                        source_mention: ROLE_MENTION.to_string(),
                        statut: Statut::Unique,
                    });
                }
            }
        }

        debug!("Derived {} role relations for act {}", rows.len(), scope);
        rows
    }
}

/// Derive role relations with the built-in [`RoleTable`]
pub fn derive_from_roles(actors: &[Actor], scope: &ActeScope) -> Vec<RelationPreview> {
    RoleTable::default().derive(actors, scope)
}
