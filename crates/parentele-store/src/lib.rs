//! Parentèle Storage Layer
//!
//! Implements the [`RelationStore`] trait on SQLite.
//!
//! # Architecture
//!
//! - `actors` and `relation_candidates` are read-only inputs for the
//!   inference core; [`SqliteStore::insert_actors`] and
//!   [`SqliteStore::insert_candidates`] exist for importing them
//! - `relations` is append-only; the core never sends a duplicate
//!   `(source, cible, type)` triple
//!
//! # Examples
//!
//! ```no_run
//! use parentele_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for relation operations
//! ```

#![warn(missing_docs)]

use parentele_domain::traits::RelationStore;
use parentele_domain::{
    ActeScope, ActeType, Actor, ActorId, RelationCandidate, RelationMode, RelationPreview, Statut,
};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const ACTOR_COLUMNS: &str = "id, acte_id, nom, prenom, qualite, source_table, acte_type, role";

const CANDIDATE_COLUMNS: &str =
    "id, acteur_source_id, acteur_source_role, acte_id, source_table, lien";

const RELATION_COLUMNS: &str = "acte_id, source_table, acteur_source_id, acteur_source_role, \
     acteur_cible_id, acteur_cible_role, relation_type, relation_mode, relation_precision, \
     source_mention, statut";

/// SQLite-based implementation of RelationStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use parentele_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("parentele.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Import actors, replacing rows with the same id
    pub fn insert_actors(&mut self, actors: &[Actor]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO actors (id, acte_id, nom, prenom, qualite, source_table, acte_type, role)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for actor in actors {
                stmt.execute(params![
                    actor.id.as_str(),
                    &actor.acte_id,
                    &actor.nom,
                    &actor.prenom,
                    &actor.qualite,
                    &actor.source_table,
                    actor.acte_type.as_str(),
                    &actor.role,
                ])?;
            }
        }
        tx.commit()?;
        Ok(actors.len())
    }

    /// Import relation candidates, replacing rows with the same id
    pub fn insert_candidates(
        &mut self,
        candidates: &[RelationCandidate],
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO relation_candidates (id, acteur_source_id, acteur_source_role, acte_id, source_table, lien)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for candidate in candidates {
                stmt.execute(params![
                    &candidate.id,
                    candidate.acteur_source_id.as_str(),
                    &candidate.acteur_source_role,
                    &candidate.acte_id,
                    &candidate.source_table,
                    &candidate.lien,
                ])?;
            }
        }
        tx.commit()?;
        Ok(candidates.len())
    }

    /// Look up one actor by id
    pub fn get_actor(&self, id: &ActorId) -> Result<Option<Actor>, StoreError> {
        let sql = format!("SELECT {} FROM actors WHERE id = ?1", ACTOR_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![id.as_str()], Self::actor_from_row)?;
        Ok(rows.next().transpose()?)
    }

    /// Every candidate whose source is the given actor, ordered by id
    pub fn get_candidates_for_actor(&self, id: &ActorId) -> Result<Vec<RelationCandidate>, StoreError> {
        let sql = format!(
            "SELECT {} FROM relation_candidates WHERE acteur_source_id = ?1 ORDER BY id",
            CANDIDATE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let candidates = stmt
            .query_map(params![id.as_str()], Self::candidate_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(candidates)
    }

    fn actor_from_row(row: &Row<'_>) -> rusqlite::Result<Actor> {
        let id: String = row.get(0)?;
        let acte_type: String = row.get(6)?;
        Ok(Actor {
            id: ActorId::new(id),
            acte_id: row.get(1)?,
            nom: row.get(2)?,
            prenom: row.get(3)?,
            qualite: row.get(4)?,
            source_table: row.get(5)?,
            acte_type: ActeType::parse(&acte_type),
            role: row.get(7)?,
        })
    }

    fn candidate_from_row(row: &Row<'_>) -> rusqlite::Result<RelationCandidate> {
        let source: String = row.get(1)?;
        Ok(RelationCandidate {
            id: row.get(0)?,
            acteur_source_id: ActorId::new(source),
            acteur_source_role: row.get(2)?,
            acte_id: row.get(3)?,
            source_table: row.get(4)?,
            lien: row.get(5)?,
        })
    }

    fn relation_from_row(row: &Row<'_>) -> rusqlite::Result<RelationPreview> {
        let source: String = row.get(2)?;
        let cible: Option<String> = row.get(4)?;
        let mode_str: String = row.get(7)?;
        let statut_str: String = row.get(10)?;

        let relation_mode = RelationMode::parse(&mode_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                7,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown relation mode: {}",
                    mode_str
                ))),
            )
        })?;

        let statut = Statut::parse(&statut_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                10,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "Unknown statut: {}",
                    statut_str
                ))),
            )
        })?;

        Ok(RelationPreview {
            acte_id: row.get(0)?,
            source_table: row.get(1)?,
            acteur_source_id: ActorId::new(source),
            acteur_source_role: row.get(3)?,
            acteur_cible_id: cible.map(ActorId::new),
            acteur_cible_role: row.get(5)?,
            relation_type: row.get(6)?,
            relation_mode,
            relation_precision: row.get(8)?,
            source_mention: row.get(9)?,
            statut,
        })
    }
}

impl RelationStore for SqliteStore {
    type Error = StoreError;

    fn fetch_candidates_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RelationCandidate>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM relation_candidates ORDER BY id LIMIT ?1 OFFSET ?2",
            CANDIDATE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let candidates = stmt
            .query_map(params![limit as i64, offset as i64], Self::candidate_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(candidates)
    }

    fn fetch_actors_page(&self, offset: usize, limit: usize) -> Result<Vec<Actor>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM actors ORDER BY id LIMIT ?1 OFFSET ?2",
            ACTOR_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let actors = stmt
            .query_map(params![limit as i64, offset as i64], Self::actor_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(actors)
    }

    fn fetch_actors_for_act(&self, scope: &ActeScope) -> Result<Vec<Actor>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM actors WHERE acte_id = ?1 AND source_table = ?2 ORDER BY id",
            ACTOR_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let actors = stmt
            .query_map(
                params![&scope.acte_id, &scope.source_table],
                Self::actor_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(actors)
    }

    fn fetch_candidates_for_act(
        &self,
        scope: &ActeScope,
    ) -> Result<Vec<RelationCandidate>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM relation_candidates WHERE acte_id = ?1 AND source_table = ?2 ORDER BY id",
            CANDIDATE_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let candidates = stmt
            .query_map(
                params![&scope.acte_id, &scope.source_table],
                Self::candidate_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(candidates)
    }

    fn fetch_existing_relations(
        &self,
        scope: &ActeScope,
    ) -> Result<Vec<RelationPreview>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM relations WHERE acte_id = ?1 AND source_table = ?2 ORDER BY rowid_seq",
            RELATION_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let relations = stmt
            .query_map(
                params![&scope.acte_id, &scope.source_table],
                Self::relation_from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(relations)
    }

    fn delete_relations_by_source_actor(
        &mut self,
        scope: &ActeScope,
        actor_id: &ActorId,
    ) -> Result<usize, Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM relations WHERE acte_id = ?1 AND source_table = ?2 AND acteur_source_id = ?3",
            params![&scope.acte_id, &scope.source_table, actor_id.as_str()],
        )?;
        debug!("Deleted {} relation(s) of actor {} in {}", deleted, actor_id, scope);
        Ok(deleted)
    }

    fn delete_relations_by_act(&mut self, scope: &ActeScope) -> Result<usize, Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM relations WHERE acte_id = ?1 AND source_table = ?2",
            params![&scope.acte_id, &scope.source_table],
        )?;
        debug!("Deleted {} relation(s) in {}", deleted, scope);
        Ok(deleted)
    }

    fn delete_relations_by_mode(
        &mut self,
        scope: &ActeScope,
        mode: RelationMode,
    ) -> Result<usize, Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM relations WHERE acte_id = ?1 AND source_table = ?2 AND relation_mode = ?3",
            params![&scope.acte_id, &scope.source_table, mode.as_str()],
        )?;
        debug!("Deleted {} {} relation(s) in {}", deleted, mode, scope);
        Ok(deleted)
    }

    fn upsert_relations(&mut self, rows: &[RelationPreview]) -> Result<usize, Self::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO relations (acte_id, source_table, acteur_source_id, acteur_source_role,
                    acteur_cible_id, acteur_cible_role, relation_type, relation_mode,
                    relation_precision, source_mention, statut)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )?;
            for row in rows {
                stmt.execute(params![
                    &row.acte_id,
                    &row.source_table,
                    row.acteur_source_id.as_str(),
                    &row.acteur_source_role,
                    row.acteur_cible_id.as_ref().map(ActorId::as_str),
                    &row.acteur_cible_role,
                    &row.relation_type,
                    row.relation_mode.as_str(),
                    &row.relation_precision,
                    &row.source_mention,
                    row.statut.as_str(),
                ])?;
            }
        }
        tx.commit()?;

        Ok(rows.len())
    }
}
