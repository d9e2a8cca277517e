//! Per-act relation graph used by the rule engine

use parentele_domain::{ActeScope, Actor, ActorId, EdgeKey, RelationMode, RelationPreview};
use std::collections::{HashMap, HashSet};

/// Simplified edge: a relation row stripped of precision, statut and mention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Source actor
    pub source: ActorId,

    /// Target actor
    pub cible: ActorId,

    /// Relation type, source relative to target
    pub relation_type: String,

    /// Explicit or implicit
    pub mode: RelationMode,
}

impl Edge {
    /// Logical identity of this edge
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.source.clone(), self.cible.clone(), self.relation_type.clone())
    }
}

/// Actors of one act indexed by id, plus the act's edges
///
/// Edges are unique by `(source, cible, relation_type)`; the first row seen
/// for a triple wins.
#[derive(Debug, Clone)]
pub struct RelationGraph {
    scope: ActeScope,
    actors: HashMap<ActorId, Actor>,
    edges: Vec<Edge>,
    keys: HashSet<EdgeKey>,
}

impl RelationGraph {
    /// Create an empty graph for one act
    pub fn new(scope: ActeScope) -> Self {
        Self {
            scope,
            actors: HashMap::new(),
            edges: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Build the graph from an act's actors and relation rows.
    ///
    /// Rows lacking a target or a type do not become edges.
    pub fn build(scope: ActeScope, actors: &[Actor], relations: &[RelationPreview]) -> Self {
        let mut graph = Self::new(scope);
        for actor in actors {
            graph.actors.insert(actor.id.clone(), actor.clone());
        }
        for row in relations {
            if let (Some(cible), Some(relation_type)) = (&row.acteur_cible_id, &row.relation_type) {
                graph.insert(Edge {
                    source: row.acteur_source_id.clone(),
                    cible: cible.clone(),
                    relation_type: relation_type.clone(),
                    mode: row.relation_mode,
                });
            }
        }
        graph
    }

    /// Act this graph describes
    pub fn scope(&self) -> &ActeScope {
        &self.scope
    }

    /// Look up an actor by id
    pub fn actor(&self, id: &ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Edges in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether an edge with this triple exists
    pub fn contains(&self, key: &EdgeKey) -> bool {
        self.keys.contains(key)
    }

    /// Add an edge; returns false if its triple was already present
    pub fn insert(&mut self, edge: Edge) -> bool {
        if !self.keys.insert(edge.key()) {
            return false;
        }
        self.edges.push(edge);
        true
    }
}
