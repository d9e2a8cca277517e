//! Relation module - candidates, extractions and persisted relation rows

use crate::{ActeScope, ActorId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// `source_mention` carried by relations derived from the role table
pub const ROLE_MENTION: &str = "rôle";

/// Resolution outcome of a parsed or derived relation.
///
/// Assigned once per pass; re-parsing replaces the row instead of patching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statut {
    /// Exactly one target actor
    Unique,

    /// Several equally valid targets, left for manual review
    Ambigu,

    /// No actor carries the resolved role
    Introuvable,

    /// Phrase could not be segmented or target could not be disambiguated
    Erreur,
}

impl Statut {
    /// Get the statut label
    pub fn as_str(&self) -> &'static str {
        match self {
            Statut::Unique => "unique",
            Statut::Ambigu => "ambigu",
            Statut::Introuvable => "introuvable",
            Statut::Erreur => "erreur",
        }
    }

    /// Parse a statut label
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unique" => Some(Statut::Unique),
            "ambigu" => Some(Statut::Ambigu),
            "introuvable" => Some(Statut::Introuvable),
            "erreur" => Some(Statut::Erreur),
            _ => None,
        }
    }

    /// All statuts, in reporting order
    pub fn all() -> [Statut; 4] {
        [Statut::Unique, Statut::Ambigu, Statut::Introuvable, Statut::Erreur]
    }
}

impl std::str::FromStr for Statut {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid statut: {}", s))
    }
}

impl fmt::Display for Statut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a relation was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationMode {
    /// From free text or from the role table
    Explicite,

    /// Deduced by the rule engine from two existing relations
    Implicite,
}

impl RelationMode {
    /// Get the mode label
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationMode::Explicite => "explicite",
            RelationMode::Implicite => "implicite",
        }
    }

    /// Parse a mode label
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "explicite" => Some(RelationMode::Explicite),
            "implicite" => Some(RelationMode::Implicite),
            _ => None,
        }
    }
}

impl std::str::FromStr for RelationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation mode: {}", s))
    }
}

impl fmt::Display for RelationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw input row: one free-text phrase attached to a source actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationCandidate {
    /// Row identifier
    pub id: String,

    /// Actor the phrase describes
    pub acteur_source_id: ActorId,

    /// Role of that actor in the act
    #[serde(default)]
    pub acteur_source_role: Option<String>,

    /// Act identifier
    pub acte_id: String,

    /// Table the act was transcribed into
    pub source_table: String,

    /// The free-text relation phrase
    pub lien: String,
}

impl RelationCandidate {
    /// Scope of the act this candidate belongs to
    pub fn scope(&self) -> ActeScope {
        ActeScope::new(self.acte_id.clone(), self.source_table.clone())
    }
}

/// Transient parse result for one phrase fragment.
///
/// Never persisted directly: see [`RelationExtraction::to_preview`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationExtraction {
    /// Kinship/social word ("fille", "tante", ...)
    pub relation_type: Option<String>,

    /// Qualifier following the relation word ("germain", "paternel", ...)
    pub relation_precision: Option<String>,

    /// Role the phrase points at ("époux", "enfant", ...)
    pub role_cible: Option<String>,

    /// Resolved target, only when `statut` is [`Statut::Unique`]
    pub acteur_cible_id: Option<ActorId>,

    /// Role of the resolved target
    pub acteur_cible_role: Option<String>,

    /// Resolution outcome
    pub statut: Statut,

    /// Normalized fragment this extraction was parsed from
    pub mention: String,
}

impl RelationExtraction {
    /// Extraction that could not be segmented or resolved
    pub fn erreur(mention: impl Into<String>) -> Self {
        Self {
            relation_type: None,
            relation_precision: None,
            role_cible: None,
            acteur_cible_id: None,
            acteur_cible_role: None,
            statut: Statut::Erreur,
            mention: mention.into(),
        }
    }

    /// Project this extraction into an explicit relation row for `source`
    pub fn to_preview(
        &self,
        scope: &ActeScope,
        source: &ActorId,
        source_role: Option<&str>,
    ) -> RelationPreview {
        RelationPreview {
            acte_id: scope.acte_id.clone(),
            source_table: scope.source_table.clone(),
            acteur_source_id: source.clone(),
            acteur_source_role: source_role.map(str::to_string),
            acteur_cible_id: self.acteur_cible_id.clone(),
            acteur_cible_role: self
                .acteur_cible_role
                .clone()
                .or_else(|| self.role_cible.clone()),
            relation_type: self.relation_type.clone(),
            relation_mode: RelationMode::Explicite,
            relation_precision: self.relation_precision.clone(),
            source_mention: self.mention.clone(),
            statut: self.statut,
        }
    }
}

/// Logical identity of a relation inside one act
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Source actor
    pub source: ActorId,

    /// Target actor
    pub cible: ActorId,

    /// Relation type
    pub relation_type: String,
}

impl EdgeKey {
    /// Create a new key
    pub fn new(source: ActorId, cible: ActorId, relation_type: impl Into<String>) -> Self {
        Self {
            source,
            cible,
            relation_type: relation_type.into(),
        }
    }
}

/// Persisted relation row (one edge of an act's kinship graph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationPreview {
    /// Act identifier
    pub acte_id: String,

    /// Table the act was transcribed into
    pub source_table: String,

    /// Actor the relation starts from
    pub acteur_source_id: ActorId,

    /// Role of the source actor
    pub acteur_source_role: Option<String>,

    /// Target actor, absent unless resolution was unique
    pub acteur_cible_id: Option<ActorId>,

    /// Role of the target actor (or the role the phrase pointed at)
    pub acteur_cible_role: Option<String>,

    /// Relation type, source relative to target
    pub relation_type: Option<String>,

    /// Explicit or implicit
    pub relation_mode: RelationMode,

    /// Qualifier of the relation type
    pub relation_precision: Option<String>,

    /// Where the row came from: a phrase fragment, the role table or a rule
    pub source_mention: String,

    /// Resolution outcome
    pub statut: Statut,
}

impl RelationPreview {
    /// Scope of the act this row belongs to
    pub fn scope(&self) -> ActeScope {
        ActeScope::new(self.acte_id.clone(), self.source_table.clone())
    }

    /// Logical identity, only for rows carrying both a target and a type.
    ///
    /// Rows without a key are triage rows: they never become graph edges and
    /// are never deduplicated.
    pub fn key(&self) -> Option<EdgeKey> {
        match (&self.acteur_cible_id, &self.relation_type) {
            (Some(cible), Some(relation_type)) => Some(EdgeKey::new(
                self.acteur_source_id.clone(),
                cible.clone(),
                relation_type.clone(),
            )),
            _ => None,
        }
    }
}
