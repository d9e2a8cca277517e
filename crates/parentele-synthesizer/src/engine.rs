//! Forward-chaining rule engine
//!
//! One pass over every rule and every ordered pair of edges sharing a
//! target. Rows deduced during a pass are not matched again in that pass;
//! a chain of deductions needs another call over a graph holding the
//! previous output.

use crate::graph::{Edge, RelationGraph};
use crate::rules::{Bindings, Condition, RelationRule};
use parentele_domain::{normalize, EdgeKey, RelationMode, RelationPreview, Statut};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Prefix of the source mention of every deduced row
pub const RULE_MENTION_PREFIX: &str = "règle: ";

/// Precisions carried by the relation rows behind each edge
type PrecisionIndex = HashMap<EdgeKey, Vec<String>>;

fn precision_index(previews: &[RelationPreview]) -> PrecisionIndex {
    let mut index: PrecisionIndex = HashMap::new();
    for row in previews {
        if let (Some(key), Some(precision)) = (row.key(), &row.relation_precision) {
            index.entry(key).or_default().push(normalize(precision));
        }
    }
    index
}

fn condition_holds(
    condition: &Condition,
    edge: &Edge,
    bindings: &Bindings<'_>,
    precisions: &PrecisionIndex,
) -> bool {
    if bindings.get(condition.source) != &edge.source
        || bindings.get(condition.cible) != &edge.cible
        || !condition.relation_type.matches(&edge.relation_type)
    {
        return false;
    }

    match &condition.precision {
        None => true,
        Some(accepted) => precisions
            .get(&edge.key())
            .is_some_and(|found| found.iter().any(|p| accepted.matches(p))),
    }
}

/// Deduce implicit relations from pairs of existing edges.
///
/// For each rule and each ordered pair of distinct edges `(rel1, rel2)` with
/// the same target and different sources, `X`, `Y` and `Z` are bound to
/// `rel1.source`, `rel2.source` and the common target. The rule's first
/// condition is checked against `rel1` and its second against `rel2`;
/// precision constraints are checked against `previews`. Every conclusion
/// then yields one implicit row, unless its triple is already in the graph
/// or was deduced earlier in the same call.
///
/// Returns only the new rows.
pub fn deduce(
    graph: &RelationGraph,
    previews: &[RelationPreview],
    rules: &[RelationRule],
) -> Vec<RelationPreview> {
    let precisions = precision_index(previews);
    let scope = graph.scope();
    let edges = graph.edges();

    let mut emitted: HashSet<EdgeKey> = HashSet::new();
    let mut rows = Vec::new();

    for rule in rules {
        for rel1 in edges {
            for rel2 in edges {
                if rel1.cible != rel2.cible || rel1.source == rel2.source {
                    continue;
                }

                let bindings = Bindings {
                    x: &rel1.source,
                    y: &rel2.source,
                    z: &rel1.cible,
                };
                if !condition_holds(&rule.first, rel1, &bindings, &precisions)
                    || !condition_holds(&rule.second, rel2, &bindings, &precisions)
                {
                    continue;
                }

                for conclusion in &rule.conclusions {
                    let source = bindings.get(conclusion.source);
                    let cible = bindings.get(conclusion.cible);
                    if source == cible {
                        continue;
                    }

                    let key = EdgeKey::new(source.clone(), cible.clone(), &conclusion.relation_type);
                    if graph.contains(&key) || emitted.contains(&key) {
                        continue;
                    }

                    debug!(
                        "Rule '{}': {} {} {} (act {})",
                        rule.name, source, conclusion.relation_type, cible, scope
                    );

                    rows.push(RelationPreview {
                        acte_id: scope.acte_id.clone(),
                        source_table: scope.source_table.clone(),
                        acteur_source_id: source.clone(),
                        acteur_source_role: graph.actor(source).and_then(|a| a.role.clone()),
                        acteur_cible_id: Some(cible.clone()),
                        acteur_cible_role: graph.actor(cible).and_then(|a| a.role.clone()),
                        relation_type: Some(conclusion.relation_type.clone()),
                        relation_mode: RelationMode::Implicite,
                        relation_precision: None,
                        source_mention: format!("{}{}", RULE_MENTION_PREFIX, rule.name),
                        statut: Statut::Unique,
                    });
                    emitted.insert(key);
                }
            }
        }
    }

    debug!("Deduced {} implicit relations for act {}", rows.len(), scope);
    rows
}
