//! Actor module - people mentioned in an act

use crate::{ActeScope, ActeType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder surname transcribers type when the record gives none.
/// Never part of an actor's matchable name.
pub const SANS_NOM: &str = "? SANS NOM";

/// Identifier of an actor row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Create an identifier from its stored value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the stored value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A person declared on an act.
///
/// Actors are read-only input: an inference pass never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier
    pub id: ActorId,

    /// Act this actor belongs to
    pub acte_id: String,

    /// Table the act was transcribed into
    pub source_table: String,

    /// Surname, possibly the [`SANS_NOM`] sentinel
    #[serde(default)]
    pub nom: Option<String>,

    /// Given name(s)
    #[serde(default)]
    pub prenom: Option<String>,

    /// Social qualité ("sieur", "dame", "demoiselle", ...)
    #[serde(default)]
    pub qualite: Option<String>,

    /// Role in the act ("père", "défunt", "témoin", ...)
    #[serde(default)]
    pub role: Option<String>,

    /// Family of the act
    pub acte_type: ActeType,
}

impl Actor {
    /// Scope of the act this actor belongs to
    pub fn scope(&self) -> ActeScope {
        ActeScope::new(self.acte_id.clone(), self.source_table.clone())
    }

    /// Whether this actor is declared on the given act
    pub fn belongs_to(&self, scope: &ActeScope) -> bool {
        self.acte_id == scope.acte_id && self.source_table == scope.source_table
    }

    /// Role as a string slice, empty when unknown
    pub fn role_str(&self) -> &str {
        self.role.as_deref().unwrap_or("")
    }

    /// Full name as "prenom nom", skipping empty parts and the sentinel surname.
    ///
    /// Returns `None` when nothing is left to match against.
    pub fn full_name(&self) -> Option<String> {
        let nom = self
            .nom
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty() && *n != SANS_NOM);
        let prenom = self
            .prenom
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());

        match (prenom, nom) {
            (Some(p), Some(n)) => Some(format!("{} {}", p, n)),
            (Some(p), None) => Some(p.to_string()),
            (None, Some(n)) => Some(n.to_string()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(nom: Option<&str>, prenom: Option<&str>) -> Actor {
        Actor {
            id: ActorId::new("a1"),
            acte_id: "1".to_string(),
            source_table: "actes".to_string(),
            nom: nom.map(str::to_string),
            prenom: prenom.map(str::to_string),
            qualite: None,
            role: Some("père".to_string()),
            acte_type: ActeType::Naissance,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(
            actor(Some("Martin"), Some("Jean")).full_name().as_deref(),
            Some("Jean Martin")
        );
        assert_eq!(actor(Some("Martin"), None).full_name().as_deref(), Some("Martin"));
        assert_eq!(actor(None, Some("Jean")).full_name().as_deref(), Some("Jean"));
        assert_eq!(actor(None, None).full_name(), None);
    }

    #[test]
    fn test_full_name_skips_sentinel() {
        assert_eq!(
            actor(Some(SANS_NOM), Some("Marie")).full_name().as_deref(),
            Some("Marie")
        );
        assert_eq!(actor(Some(SANS_NOM), None).full_name(), None);
    }

    #[test]
    fn test_scope_membership() {
        let a = actor(Some("Martin"), None);
        assert!(a.belongs_to(&ActeScope::new("1", "actes")));
        assert!(!a.belongs_to(&ActeScope::new("1", "autres")));
        assert_eq!(a.scope().to_string(), "1::actes");
    }
}
