//! Trait definitions for external interactions
//!
//! The inference core never talks to a database directly; it goes through
//! [`RelationStore`]. Implementations live in other crates.

use crate::{ActeScope, Actor, ActorId, RelationCandidate, RelationMode, RelationPreview};

/// Trait for reading act rosters and persisting relation rows
///
/// Implemented by the infrastructure layer (parentele-store)
pub trait RelationStore {
    /// Error type for store operations
    type Error;

    /// Read one page of relation candidates, ordered by id
    fn fetch_candidates_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RelationCandidate>, Self::Error>;

    /// Read one page of the actor roster, ordered by id
    fn fetch_actors_page(&self, offset: usize, limit: usize) -> Result<Vec<Actor>, Self::Error>;

    /// All actors declared on one act
    fn fetch_actors_for_act(&self, scope: &ActeScope) -> Result<Vec<Actor>, Self::Error>;

    /// All relation candidates attached to one act
    fn fetch_candidates_for_act(
        &self,
        scope: &ActeScope,
    ) -> Result<Vec<RelationCandidate>, Self::Error>;

    /// Relation rows already persisted for one act
    fn fetch_existing_relations(
        &self,
        scope: &ActeScope,
    ) -> Result<Vec<RelationPreview>, Self::Error>;

    /// Delete every row whose source is `actor_id`; returns rows deleted
    fn delete_relations_by_source_actor(
        &mut self,
        scope: &ActeScope,
        actor_id: &ActorId,
    ) -> Result<usize, Self::Error>;

    /// Delete every row of one act; returns rows deleted
    fn delete_relations_by_act(&mut self, scope: &ActeScope) -> Result<usize, Self::Error>;

    /// Delete every row of one act with the given mode; returns rows deleted
    fn delete_relations_by_mode(
        &mut self,
        scope: &ActeScope,
        mode: RelationMode,
    ) -> Result<usize, Self::Error>;

    /// Append rows. The store does not deduplicate; callers must not send
    /// a triple that is already persisted.
    fn upsert_relations(&mut self, rows: &[RelationPreview]) -> Result<usize, Self::Error>;
}
