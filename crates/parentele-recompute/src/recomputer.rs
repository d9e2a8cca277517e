//! Core Recomputer implementation
//!
//! Rebuilds the relation rows of an act, or of one actor after its phrase
//! was edited. Rows are always replaced, never patched: the act's (or the
//! actor's) rows are deleted, then recomputed and appended.
//!
//! The delete and the append are separate store calls. Two recomputes of
//! the same act running at once can interleave and leave duplicates.

use crate::{fetch_all_paged, ActorIndex, RecomputeConfig, RecomputeError, RecomputeMetrics};
use parentele_domain::traits::RelationStore;
use parentele_domain::{
    ActeContext, ActeScope, Actor, EdgeKey, RelationCandidate, RelationMode,
    RelationPreview,
};
use parentele_extractor::Extractor;
use parentele_synthesizer::{deduce, RelationGraph, RoleTable, RuleSet};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, error, info, warn};

fn store_error<E: Display>(err: E) -> RecomputeError {
    RecomputeError::Store(err.to_string())
}

/// Keep the first row of every `(source, cible, type)` triple; rows without
/// a triple are kept as they are.
fn dedupe(rows: Vec<RelationPreview>, seen: &mut HashSet<EdgeKey>) -> Vec<RelationPreview> {
    rows.into_iter()
        .filter(|row| match row.key() {
            Some(key) => seen.insert(key),
            None => true,
        })
        .collect()
}

/// Recomputes relation rows from actors, phrases, roles and rules
///
/// # Examples
///
/// ```no_run
/// use parentele_recompute::Recomputer;
/// use parentele_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut store = SqliteStore::new("parentele.db")?;
/// let mut recomputer = Recomputer::default_config();
///
/// let metrics = recomputer.run_batch(&mut store)?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Recomputer {
    extractor: Extractor,
    roles: RoleTable,
    rules: RuleSet,
    config: RecomputeConfig,
    metrics: RecomputeMetrics,
}

impl Recomputer {
    /// Create a new Recomputer
    pub fn new(extractor: Extractor, roles: RoleTable, rules: RuleSet, config: RecomputeConfig) -> Self {
        Self {
            extractor,
            roles,
            rules,
            config,
            metrics: RecomputeMetrics::new(),
        }
    }

    /// Create a Recomputer with the built-in lexicon, role table and rules
    pub fn default_config() -> Self {
        Self::with_config(RecomputeConfig::default())
    }

    /// Built-in lexicon, role table and rules with the given configuration
    pub fn with_config(config: RecomputeConfig) -> Self {
        Self::new(Extractor::default(), RoleTable::default(), RuleSet::default(), config)
    }

    /// Configuration in use
    pub fn config(&self) -> &RecomputeConfig {
        &self.config
    }

    /// Metrics accumulated since creation or the last reset
    pub fn metrics(&self) -> &RecomputeMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Parse one phrase for `source` against the other actors of its act
    fn parse_lien(&self, source: &Actor, source_role: Option<&str>, lien: &str, actors: &[Actor]) -> Vec<RelationPreview> {
        let scope = source.scope();
        let others: Vec<Actor> = actors
            .iter()
            .filter(|actor| actor.id != source.id)
            .cloned()
            .collect();
        let context = ActeContext::new(scope.clone(), source.acte_type.clone());

        self.extractor
            .extract(lien, &context, &others)
            .iter()
            .map(|extraction| extraction.to_preview(&scope, &source.id, source_role))
            .collect()
    }

    /// Parse a candidate's phrase; the candidate's recorded source role wins
    /// over the actor's own role.
    fn parse_candidate(&self, source: &Actor, candidate: &RelationCandidate, actors: &[Actor]) -> Vec<RelationPreview> {
        let source_role = candidate
            .acteur_source_role
            .as_deref()
            .or(source.role.as_deref());
        self.parse_lien(source, source_role, &candidate.lien, actors)
    }

    /// Implicit rows deduced from `rows`, none if inference is disabled
    fn infer(&self, scope: &ActeScope, actors: &[Actor], rows: &[RelationPreview]) -> Vec<RelationPreview> {
        if !self.config.infer_implicit {
            return Vec::new();
        }
        let graph = RelationGraph::build(scope.clone(), actors, rows);
        deduce(&graph, rows, self.rules.rules())
    }

    /// Compute every row of one act without touching the store.
    ///
    /// Order: role rows, then each candidate's phrase, then rule deductions.
    /// Candidates whose source actor is not on the act are skipped.
    pub fn build_act_rows(
        &self,
        scope: &ActeScope,
        actors: &[Actor],
        candidates: &[RelationCandidate],
    ) -> Vec<RelationPreview> {
        let actors: Vec<Actor> = actors.iter().filter(|a| a.belongs_to(scope)).cloned().collect();
        let mut explicit = Vec::new();

        if self.config.derive_roles {
            explicit.extend(self.roles.derive(&actors, scope));
        }

        for candidate in candidates.iter().filter(|c| c.scope() == *scope) {
            let Some(source) = actors.iter().find(|a| a.id == candidate.acteur_source_id) else {
                warn!(
                    "Candidate {} points at unknown actor {} on act {}",
                    candidate.id, candidate.acteur_source_id, scope
                );
                continue;
            };
            explicit.extend(self.parse_candidate(source, candidate, &actors));
        }

        let mut seen = HashSet::new();
        let mut rows = dedupe(explicit, &mut seen);
        let implicit = self.infer(scope, &actors, &rows);
        rows.extend(dedupe(implicit, &mut seen));

        debug!(
            "Act {}: {} actors, {} candidates, {} rows",
            scope,
            actors.len(),
            candidates.len(),
            rows.len()
        );
        rows
    }

    fn replace_act_rows<S: RelationStore>(
        &mut self,
        store: &mut S,
        scope: &ActeScope,
        actors: &[Actor],
        candidates: &[RelationCandidate],
    ) -> Result<usize, RecomputeError>
    where
        S::Error: Display,
    {
        if self.config.dry_run {
            let rows = self.build_act_rows(scope, actors, candidates);
            info!("DRY RUN: Would rewrite act {} with {} rows", scope, rows.len());
            return Ok(0);
        }

        let deleted = store.delete_relations_by_act(scope).map_err(store_error)?;
        let rows = self.build_act_rows(scope, actors, candidates);
        let written = store.upsert_relations(&rows).map_err(store_error)?;

        self.metrics.record_deleted(deleted);
        self.metrics.record_rows(&rows);
        Ok(written)
    }

    /// Rebuild every row of one act.
    ///
    /// Deletes the act's rows, derives role relations, re-parses the phrase
    /// of every candidate of the act, runs the rule engine and writes the
    /// result in one call. Returns rows written.
    pub fn recompute_for_act<S: RelationStore>(
        &mut self,
        store: &mut S,
        scope: &ActeScope,
        actors: &[Actor],
    ) -> Result<usize, RecomputeError>
    where
        S::Error: Display,
    {
        let candidates = store.fetch_candidates_for_act(scope).map_err(store_error)?;
        let written = self.replace_act_rows(store, scope, actors, &candidates)?;
        self.metrics.record_act();
        info!("Recomputed act {}: {} rows", scope, written);
        Ok(written)
    }

    /// Rebuild the rows of one actor after its phrases changed.
    ///
    /// Deletes the rows sourced from `actor`, derives its role rows again,
    /// parses every candidate of `candidates` that belongs to the actor,
    /// appends the rows whose triple is not already stored for the act, then
    /// refreshes the act's implicit rows from what remains. Returns rows
    /// written.
    pub fn recompute_for_actor<S: RelationStore>(
        &mut self,
        store: &mut S,
        actor: &Actor,
        candidates: &[RelationCandidate],
        actors: &[Actor],
    ) -> Result<usize, RecomputeError>
    where
        S::Error: Display,
    {
        let scope = actor.scope();
        let actors: Vec<Actor> = actors.iter().filter(|a| a.belongs_to(&scope)).cloned().collect();

        let mut explicit = Vec::new();
        if self.config.derive_roles {
            explicit.extend(
                self.roles
                    .derive(&actors, &scope)
                    .into_iter()
                    .filter(|row| row.acteur_source_id == actor.id),
            );
        }
        for candidate in candidates {
            if candidate.acteur_source_id != actor.id || candidate.scope() != scope {
                warn!(
                    "Candidate {} does not belong to actor {} on act {}",
                    candidate.id, actor.id, scope
                );
                continue;
            }
            explicit.extend(self.parse_candidate(actor, candidate, &actors));
        }

        if self.config.dry_run {
            info!(
                "DRY RUN: Would rewrite {} rows for actor {} on act {}",
                explicit.len(),
                actor.id,
                scope
            );
            return Ok(0);
        }

        let deleted = store
            .delete_relations_by_source_actor(&scope, &actor.id)
            .map_err(store_error)?;
        self.metrics.record_deleted(deleted);

        let existing = store.fetch_existing_relations(&scope).map_err(store_error)?;
        let mut seen: HashSet<EdgeKey> = existing.iter().filter_map(RelationPreview::key).collect();
        let fresh = dedupe(explicit, &mut seen);
        let mut written = store.upsert_relations(&fresh).map_err(store_error)?;
        self.metrics.record_rows(&fresh);

        if self.config.infer_implicit {
            let deleted = store
                .delete_relations_by_mode(&scope, RelationMode::Implicite)
                .map_err(store_error)?;
            self.metrics.record_deleted(deleted);

            let remaining = store.fetch_existing_relations(&scope).map_err(store_error)?;
            let implicit = self.infer(&scope, &actors, &remaining);
            written += store.upsert_relations(&implicit).map_err(store_error)?;
            self.metrics.record_rows(&implicit);
        }

        self.metrics.record_actor();
        info!("Recomputed actor {} on act {}: {} rows", actor.id, scope, written);
        Ok(written)
    }

    /// Recompute every act known to the store.
    ///
    /// Pages through candidates and actors, groups actors by act and
    /// rebuilds each act in turn. A failing act is logged and counted and
    /// the batch moves on. Only a failure to read the pages aborts the run.
    pub fn run_batch<S: RelationStore>(&mut self, store: &mut S) -> Result<RecomputeMetrics, RecomputeError>
    where
        S::Error: Display,
    {
        let start = Instant::now();
        let page_size = self.config.page_size;

        let candidates = fetch_all_paged(page_size, |offset, limit| {
            store.fetch_candidates_page(offset, limit)
        })
        .map_err(store_error)?;
        let actors = fetch_all_paged(page_size, |offset, limit| store.fetch_actors_page(offset, limit))
            .map_err(store_error)?;

        // Acts with actors but no phrase still get their role rows
        let index = ActorIndex::from_actors(actors);
        let mut by_act: BTreeMap<ActeScope, Vec<RelationCandidate>> = index
            .scopes()
            .into_iter()
            .map(|scope| (scope, Vec::new()))
            .collect();
        for candidate in candidates {
            by_act.entry(candidate.scope()).or_default().push(candidate);
        }

        info!(
            "Batch: {} acts, {} with actors (page size {})",
            by_act.len(),
            index.len(),
            page_size
        );

        let (mut processed, mut failed) = (0, 0);
        for (scope, candidates) in &by_act {
            match self.replace_act_rows(store, scope, index.actors_for(scope), candidates) {
                Ok(written) => {
                    processed += 1;
                    self.metrics.record_act();
                    debug!("Act {}: {} rows written", scope, written);
                }
                Err(e) => {
                    failed += 1;
                    self.metrics.record_failure();
                    error!("Recompute failed for act {}: {}", scope, e);
                }
            }
        }

        self.metrics.total_runtime_ms += start.elapsed().as_millis();
        info!("Batch done: {} acts recomputed, {} failed", processed, failed);
        Ok(self.metrics.clone())
    }
}
