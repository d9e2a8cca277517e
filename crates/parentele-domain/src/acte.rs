//! Acte module - scoping of actors and relations to one record

use crate::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one act: relations never cross this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActeScope {
    /// Identifier of the act inside its source table
    pub acte_id: String,

    /// Table the act was transcribed into (one per act family)
    pub source_table: String,
}

impl ActeScope {
    /// Create a new scope
    pub fn new(acte_id: impl Into<String>, source_table: impl Into<String>) -> Self {
        Self {
            acte_id: acte_id.into(),
            source_table: source_table.into(),
        }
    }
}

impl fmt::Display for ActeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.acte_id, self.source_table)
    }
}

/// Kind of act. Only the three families below change parsing behavior;
/// any other label is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActeType {
    /// Birth or baptism record
    Naissance,

    /// Death or burial record
    Deces,

    /// Marriage record
    Mariage,

    /// Any other act family (notarial acts, censuses, ...)
    Autre(String),
}

impl ActeType {
    /// Parse an act type label; unknown labels become [`ActeType::Autre`]
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "naissance" => ActeType::Naissance,
            "décès" | "deces" => ActeType::Deces,
            "mariage" => ActeType::Mariage,
            _ => ActeType::Autre(s.trim().to_string()),
        }
    }

    /// Get the act type label
    pub fn as_str(&self) -> &str {
        match self {
            ActeType::Naissance => "naissance",
            ActeType::Deces => "décès",
            ActeType::Mariage => "mariage",
            ActeType::Autre(label) => label,
        }
    }
}

impl From<String> for ActeType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ActeType> for String {
    fn from(t: ActeType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ActeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the segmenter needs to know about the act a phrase came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActeContext {
    /// Act the phrase belongs to
    pub scope: ActeScope,

    /// Act family, drives the implicit determinant
    pub acte_type: ActeType,
}

impl ActeContext {
    /// Create a new context
    pub fn new(scope: ActeScope, acte_type: ActeType) -> Self {
        Self { scope, acte_type }
    }
}
