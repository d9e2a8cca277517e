//! Parentèle Recompute
//!
//! Orchestrates the inference core against a [`RelationStore`]: rebuilds the
//! relation rows of one act, of one actor after an edit, or of every act in
//! a batch.
//!
//! # Overview
//!
//! A recompute always replaces rows rather than patching them:
//!
//! ```text
//! persisted ──delete──► absent ──parse/derive──► extracted ──upsert──► persisted
//! ```
//!
//! After a single actor is recomputed, the act's implicit rows are dropped
//! and deduced again from the rows that remain.
//!
//! # Usage
//!
//! ## Whole database
//!
//! ```no_run
//! use parentele_recompute::{Recomputer, RecomputeConfig};
//! use parentele_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("parentele.db")?;
//! let mut recomputer = Recomputer::with_config(RecomputeConfig::default());
//!
//! let metrics = recomputer.run_batch(&mut store)?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## One act
//!
//! ```no_run
//! use parentele_domain::{ActeScope, RelationStore};
//! use parentele_recompute::Recomputer;
//! use parentele_store::SqliteStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new("parentele.db")?;
//! let scope = ActeScope::new("1204", "actes_naissance");
//! let actors = store.fetch_actors_for_act(&scope)?;
//!
//! let written = Recomputer::default_config().recompute_for_act(&mut store, &scope, &actors)?;
//! println!("{} rows", written);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`RecomputeConfig`] loads from TOML:
//!
//! ```toml
//! page_size = 500
//! dry_run = false
//! derive_roles = true
//! infer_implicit = true
//! ```
//!
//! [`RelationStore`]: parentele_domain::RelationStore

#![warn(missing_docs)]

mod config;
mod error;
mod index;
mod metrics;
mod paging;
mod recomputer;

pub use config::RecomputeConfig;
pub use error::RecomputeError;
pub use index::ActorIndex;
pub use metrics::RecomputeMetrics;
pub use paging::fetch_all_paged;
pub use recomputer::Recomputer;
