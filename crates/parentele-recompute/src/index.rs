//! Actor roster grouped by act

use parentele_domain::{ActeScope, Actor};
use std::collections::HashMap;

/// Actors grouped by the act they are declared on
///
/// Built once per batch from the paged roster and passed to every act
/// recompute.
#[derive(Debug, Clone, Default)]
pub struct ActorIndex {
    by_act: HashMap<ActeScope, Vec<Actor>>,
}

impl ActorIndex {
    /// Group a roster by act, keeping roster order within each act
    pub fn from_actors(actors: impl IntoIterator<Item = Actor>) -> Self {
        let mut by_act: HashMap<ActeScope, Vec<Actor>> = HashMap::new();
        for actor in actors {
            by_act.entry(actor.scope()).or_default().push(actor);
        }
        Self { by_act }
    }

    /// Actors of one act; empty if the act is unknown
    pub fn actors_for(&self, scope: &ActeScope) -> &[Actor] {
        self.by_act.get(scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every indexed act, sorted
    pub fn scopes(&self) -> Vec<ActeScope> {
        let mut scopes: Vec<ActeScope> = self.by_act.keys().cloned().collect();
        scopes.sort();
        scopes
    }

    /// Number of acts
    pub fn len(&self) -> usize {
        self.by_act.len()
    }

    /// Whether no act is indexed
    pub fn is_empty(&self) -> bool {
        self.by_act.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parentele_domain::{ActeType, ActorId};

    fn actor(id: &str, acte_id: &str, table: &str) -> Actor {
        Actor {
            id: ActorId::new(id),
            acte_id: acte_id.to_string(),
            source_table: table.to_string(),
            nom: None,
            prenom: None,
            qualite: None,
            role: None,
            acte_type: ActeType::Naissance,
        }
    }

    #[test]
    fn test_groups_by_act_and_table() {
        let index = ActorIndex::from_actors(vec![
            actor("a", "1", "naissances"),
            actor("b", "1", "deces"),
            actor("c", "1", "naissances"),
        ]);

        assert_eq!(index.len(), 2);
        let ids: Vec<&str> = index
            .actors_for(&ActeScope::new("1", "naissances"))
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(index.actors_for(&ActeScope::new("9", "naissances")).is_empty());
        assert_eq!(index.scopes()[0], ActeScope::new("1", "deces"));
    }
}
