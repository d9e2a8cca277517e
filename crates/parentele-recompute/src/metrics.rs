//! Metrics collection for recompute runs

use parentele_domain::{RelationMode, RelationPreview, Statut, ROLE_MENTION};
use std::collections::HashMap;

/// Metrics collected while recomputing relations
#[derive(Debug, Clone, Default)]
pub struct RecomputeMetrics {
    /// Acts recomputed successfully
    pub acts_processed: usize,

    /// Acts whose recompute failed
    pub acts_failed: usize,

    /// Single-actor recomputes
    pub actors_processed: usize,

    /// Rows written per mode
    pub rows_by_mode: HashMap<RelationMode, usize>,

    /// Rows written per statut
    pub rows_by_statut: HashMap<Statut, usize>,

    /// Rows written from the role table
    pub role_rows: usize,

    /// Rows deleted before rewriting
    pub rows_deleted: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u128,
}

impl RecomputeMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record rows handed to the store
    pub fn record_rows(&mut self, rows: &[RelationPreview]) {
        for row in rows {
            *self.rows_by_mode.entry(row.relation_mode).or_insert(0) += 1;
            *self.rows_by_statut.entry(row.statut).or_insert(0) += 1;
            if row.source_mention == ROLE_MENTION {
                self.role_rows += 1;
            }
        }
    }

    /// Record deleted rows
    pub fn record_deleted(&mut self, count: usize) {
        self.rows_deleted += count;
    }

    /// Record a successful act recompute
    pub fn record_act(&mut self) {
        self.acts_processed += 1;
    }

    /// Record a failed act recompute
    pub fn record_failure(&mut self) {
        self.acts_failed += 1;
    }

    /// Record a single-actor recompute
    pub fn record_actor(&mut self) {
        self.actors_processed += 1;
    }

    /// Rows written with the given mode
    pub fn rows_with_mode(&self, mode: RelationMode) -> usize {
        self.rows_by_mode.get(&mode).copied().unwrap_or(0)
    }

    /// Rows written with the given statut
    pub fn rows_with_statut(&self, statut: Statut) -> usize {
        self.rows_by_statut.get(&statut).copied().unwrap_or(0)
    }

    /// Total rows written
    pub fn total_rows(&self) -> usize {
        self.rows_by_mode.values().sum()
    }

    /// Add another run's counters to these
    pub fn merge(&mut self, other: &RecomputeMetrics) {
        self.acts_processed += other.acts_processed;
        self.acts_failed += other.acts_failed;
        self.actors_processed += other.actors_processed;
        for (mode, count) in &other.rows_by_mode {
            *self.rows_by_mode.entry(*mode).or_insert(0) += count;
        }
        for (statut, count) in &other.rows_by_statut {
            *self.rows_by_statut.entry(*statut).or_insert(0) += count;
        }
        self.role_rows += other.role_rows;
        self.rows_deleted += other.rows_deleted;
        self.total_runtime_ms += other.total_runtime_ms;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Recompute Metrics Summary".to_string(),
            "=========================".to_string(),
            format!("Acts processed: {}", self.acts_processed),
            format!("Acts failed: {}", self.acts_failed),
            format!("Actors processed: {}", self.actors_processed),
            format!("Rows deleted: {}", self.rows_deleted),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            String::new(),
        ];

        if self.total_rows() > 0 {
            lines.push("Rows by mode:".to_string());
            for mode in [RelationMode::Explicite, RelationMode::Implicite] {
                lines.push(format!("  {}: {}", mode, self.rows_with_mode(mode)));
            }
            lines.push(format!("  from roles: {}", self.role_rows));
            lines.push(format!("  Total: {}", self.total_rows()));
            lines.push(String::new());

            lines.push("Rows by statut:".to_string());
            for statut in Statut::all() {
                let count = self.rows_with_statut(statut);
                if count > 0 {
                    lines.push(format!("  {}: {}", statut, count));
                }
            }
        }

        lines.join("\n")
    }
}
