//! Declarative deduction rules
//!
//! A rule reads two edges pointing at the same actor Z from two different
//! sources X and Y, and concludes new edges between X, Y and Z. Rules are
//! plain data: the built-in set can be replaced by a TOML file.
//!
//! ```toml
//! [[rules]]
//! name = "oncle paternel"
//!
//! [rules.first]
//! source = "X"
//! cible = "Z"
//! relation_type = "oncle"
//! precision = ["paternel", "du côté paternel"]
//!
//! [rules.second]
//! source = "Y"
//! cible = "Z"
//! relation_type = "père"
//!
//! [[rules.conclusions]]
//! source = "X"
//! cible = "Y"
//! relation_type = "frère"
//! ```

use crate::error::SynthesizerError;
use parentele_domain::{normalize, ActorId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Symbolic actor bound while matching a rule
///
/// `X` is the source of the first edge, `Y` the source of the second and
/// `Z` their common target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Var {
    /// Source of the first edge
    X,
    /// Source of the second edge
    Y,
    /// Common target
    Z,
}

/// Actors bound to the rule variables for one pair of edges
#[derive(Debug, Clone, Copy)]
pub struct Bindings<'a> {
    /// Bound to [`Var::X`]
    pub x: &'a ActorId,
    /// Bound to [`Var::Y`]
    pub y: &'a ActorId,
    /// Bound to [`Var::Z`]
    pub z: &'a ActorId,
}

impl<'a> Bindings<'a> {
    /// Actor bound to `var`
    pub fn get(&self, var: Var) -> &'a ActorId {
        match var {
            Var::X => self.x,
            Var::Y => self.y,
            Var::Z => self.z,
        }
    }
}

/// A single value or a set of accepted values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// Exactly this value
    One(String),
    /// Any of these values
    Many(Vec<String>),
}

impl OneOrMany {
    /// Accepted values
    pub fn values(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    /// Whether a value is accepted, compared after normalization
    pub fn matches(&self, value: &str) -> bool {
        let value = normalize(value);
        self.values().iter().any(|accepted| *accepted == value)
    }

    fn normalized(self) -> Self {
        match self {
            OneOrMany::One(value) => OneOrMany::One(normalize(&value)),
            OneOrMany::Many(values) => OneOrMany::Many(values.iter().map(|v| normalize(v)).collect()),
        }
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        OneOrMany::One(value.to_string())
    }
}

impl From<&[&str]> for OneOrMany {
    fn from(values: &[&str]) -> Self {
        OneOrMany::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// Antecedent of a rule, checked against one edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Variable the edge source must be bound to
    pub source: Var,

    /// Variable the edge target must be bound to
    pub cible: Var,

    /// Accepted relation types
    pub relation_type: OneOrMany,

    /// Accepted precisions; when set, the relation row behind the edge must
    /// carry one of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<OneOrMany>,
}

impl Condition {
    /// Condition without precision constraint
    pub fn new(source: Var, cible: Var, relation_type: impl Into<OneOrMany>) -> Self {
        Self {
            source,
            cible,
            relation_type: relation_type.into(),
            precision: None,
        }
    }

    /// Require one of these precisions
    pub fn with_precision(mut self, precision: impl Into<OneOrMany>) -> Self {
        self.precision = Some(precision.into());
        self
    }
}

/// Edge emitted when both antecedents match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    /// Variable bound to the new edge's source
    pub source: Var,

    /// Variable bound to the new edge's target
    pub cible: Var,

    /// Relation type of the new edge
    pub relation_type: String,
}

impl Conclusion {
    /// Create a new conclusion
    pub fn new(source: Var, cible: Var, relation_type: &str) -> Self {
        Self {
            source,
            cible,
            relation_type: relation_type.to_string(),
        }
    }
}

/// A named deduction rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRule {
    /// Name, recorded in the source mention of every deduced row
    pub name: String,

    /// Checked against the first edge (X to Z)
    pub first: Condition,

    /// Checked against the second edge (Y to Z)
    pub second: Condition,

    /// Edges deduced when both conditions hold
    pub conclusions: Vec<Conclusion>,
}

impl RelationRule {
    fn normalized(self) -> Self {
        let condition = |c: Condition| Condition {
            relation_type: c.relation_type.normalized(),
            precision: c.precision.map(OneOrMany::normalized),
            ..c
        };
        Self {
            name: self.name.trim().to_string(),
            first: condition(self.first),
            second: condition(self.second),
            conclusions: self
                .conclusions
                .into_iter()
                .map(|c| Conclusion {
                    relation_type: normalize(&c.relation_type),
                    ..c
                })
                .collect(),
        }
    }

    /// Validate a single rule
    pub fn validate(&self) -> Result<(), SynthesizerError> {
        let invalid = |reason: &str| SynthesizerError::InvalidRule {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        if self.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.conclusions.is_empty() {
            return Err(invalid("at least one conclusion is required"));
        }
        for condition in [&self.first, &self.second] {
            let types = condition.relation_type.values();
            if types.is_empty() || types.iter().any(String::is_empty) {
                return Err(invalid("condition relation types must not be blank"));
            }
            if let Some(precision) = &condition.precision {
                if precision.values().is_empty() {
                    return Err(invalid("precision set must not be empty"));
                }
            }
        }
        for conclusion in &self.conclusions {
            if conclusion.relation_type.is_empty() {
                return Err(invalid("conclusion relation type must not be blank"));
            }
            if conclusion.source == conclusion.cible {
                return Err(invalid("a conclusion cannot relate an actor to itself"));
            }
        }
        Ok(())
    }
}

/// Ordered collection of rules fed to the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Rules, applied in order
    #[serde(default)]
    pub rules: Vec<RelationRule>,
}

fn rule(name: &str, first: Condition, second: Condition, conclusions: Vec<Conclusion>) -> RelationRule {
    RelationRule {
        name: name.to_string(),
        first,
        second,
        conclusions,
    }
}

impl Default for RuleSet {
    /// Built-in kinship rules
    fn default() -> Self {
        use Var::{X, Y, Z};

        let children: &[&str] = &["fils", "fille", "enfant"];
        let siblings: &[&str] = &["frère", "sœur", "soeur"];

        Self {
            rules: vec![
                rule(
                    "frère par un parent commun",
                    Condition::new(X, Z, "fils"),
                    Condition::new(Y, Z, children),
                    vec![Conclusion::new(X, Y, "frère")],
                ),
                rule(
                    "sœur par un parent commun",
                    Condition::new(X, Z, "fille"),
                    Condition::new(Y, Z, children),
                    vec![Conclusion::new(X, Y, "sœur")],
                ),
                rule(
                    "époux par un enfant commun",
                    Condition::new(X, Z, "père"),
                    Condition::new(Y, Z, "mère"),
                    vec![Conclusion::new(X, Y, "époux"), Conclusion::new(Y, X, "épouse")],
                ),
                rule(
                    "père d'un frère ou d'une sœur",
                    Condition::new(X, Z, "père"),
                    Condition::new(Y, Z, siblings),
                    vec![Conclusion::new(X, Y, "père")],
                ),
                rule(
                    "mère d'un frère ou d'une sœur",
                    Condition::new(X, Z, "mère"),
                    Condition::new(Y, Z, siblings),
                    vec![Conclusion::new(X, Y, "mère")],
                ),
                rule(
                    "oncle paternel",
                    Condition::new(X, Z, "oncle").with_precision(&["paternel", "du côté paternel"][..]),
                    Condition::new(Y, Z, "père"),
                    vec![Conclusion::new(X, Y, "frère")],
                ),
                rule(
                    "oncle maternel",
                    Condition::new(X, Z, "oncle").with_precision(&["maternel", "du côté maternel"][..]),
                    Condition::new(Y, Z, "mère"),
                    vec![Conclusion::new(X, Y, "frère")],
                ),
                rule(
                    "tante paternelle",
                    Condition::new(X, Z, "tante")
                        .with_precision(&["paternelle", "du côté paternel"][..]),
                    Condition::new(Y, Z, "père"),
                    vec![Conclusion::new(X, Y, "sœur")],
                ),
                rule(
                    "tante maternelle",
                    Condition::new(X, Z, "tante")
                        .with_precision(&["maternelle", "du côté maternel"][..]),
                    Condition::new(Y, Z, "mère"),
                    vec![Conclusion::new(X, Y, "sœur")],
                ),
            ],
        }
    }
}

impl RuleSet {
    /// A rule set with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Load rules from TOML (`[[rules]]` entries)
    pub fn from_toml(toml_str: &str) -> Result<Self, SynthesizerError> {
        let set: RuleSet = toml::from_str(toml_str)?;
        let set = set.normalized();
        set.validate()?;
        Ok(set)
    }

    /// Serialize the rules to TOML
    pub fn to_toml(&self) -> Result<String, SynthesizerError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every rule and reject duplicate names
    pub fn validate(&self) -> Result<(), SynthesizerError> {
        let mut names = HashSet::new();
        for rule in &self.rules {
            rule.validate()?;
            if !names.insert(rule.name.as_str()) {
                return Err(SynthesizerError::InvalidRule {
                    name: rule.name.clone(),
                    reason: "duplicate rule name".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Normalize relation types and precisions of every rule
    pub fn normalized(self) -> Self {
        Self {
            rules: self.rules.into_iter().map(RelationRule::normalized).collect(),
        }
    }

    /// Rules in order
    pub fn rules(&self) -> &[RelationRule] {
        &self.rules
    }
}
