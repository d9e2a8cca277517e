//! Recompute command implementations.

use crate::cli::{ActArgs, ActorArgs, RecomputeArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use parentele_domain::{ActeScope, ActorId, RelationCandidate, RelationStore};
use parentele_recompute::RecomputeConfig;
use parentele_store::SqliteStore;

/// Recompute settings from the config file with command-line overrides
fn recompute_config(args: &RecomputeArgs, config: &Config) -> RecomputeConfig {
    let mut recompute = config.recompute.clone();
    if args.dry_run {
        recompute.dry_run = true;
    }
    if let Some(page_size) = args.page_size {
        recompute.page_size = page_size;
    }
    if args.no_rules {
        recompute.infer_implicit = false;
    }
    recompute
}

/// Execute the recompute command over every act.
pub fn execute_recompute(
    args: RecomputeArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let recompute = recompute_config(&args, config);
    let dry_run = recompute.dry_run;
    let mut recomputer = config.recomputer(recompute)?;

    let metrics = recomputer.run_batch(store)?;
    println!("{}", formatter.format_metrics(&metrics)?);

    if dry_run {
        println!("{}", formatter.info("Dry run: nothing was written"));
    }
    if metrics.acts_failed > 0 {
        println!(
            "{}",
            formatter.warning(&format!("{} act(s) failed, see the log", metrics.acts_failed))
        );
    }
    Ok(())
}

/// Execute the recompute-act command.
pub fn execute_recompute_act(
    args: ActArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let scope = ActeScope::new(args.acte_id, args.table);
    let actors = store.fetch_actors_for_act(&scope)?;
    if actors.is_empty() {
        return Err(CliError::NotFound(format!("No actors for act {}", scope)));
    }

    let mut recomputer = config.recomputer(config.recompute.clone())?;
    let written = recomputer.recompute_for_act(store, &scope, &actors)?;

    println!("{}", formatter.format_relations(&store.fetch_existing_relations(&scope)?)?);
    println!("{}", formatter.success(&format!("Wrote {} row(s) for act {}", written, scope)));
    Ok(())
}

/// Execute the recompute-actor command.
pub fn execute_recompute_actor(
    args: ActorArgs,
    store: &mut SqliteStore,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let id = ActorId::new(args.actor_id);
    let actor = store
        .get_actor(&id)?
        .ok_or_else(|| CliError::NotFound(format!("Actor '{}'", id)))?;

    let stored = store.get_candidates_for_actor(&id)?;
    let candidates = match args.lien {
        // The edited phrase replaces every stored phrase of the actor
        Some(lien) => vec![RelationCandidate {
            id: format!("{}-edit", id),
            acteur_source_id: id.clone(),
            acteur_source_role: stored.first().and_then(|c| c.acteur_source_role.clone()),
            acte_id: actor.acte_id.clone(),
            source_table: actor.source_table.clone(),
            lien,
        }],
        None if stored.is_empty() => {
            return Err(CliError::NotFound(format!("No relation phrase for actor '{}'", id)));
        }
        None => stored,
    };

    let scope = actor.scope();
    let actors = store.fetch_actors_for_act(&scope)?;
    let mut recomputer = config.recomputer(config.recompute.clone())?;
    let written = recomputer.recompute_for_actor(store, &actor, &candidates, &actors)?;

    let rows: Vec<_> = store
        .fetch_existing_relations(&scope)?
        .into_iter()
        .filter(|row| row.acteur_source_id == id)
        .collect();
    println!("{}", formatter.format_relations(&rows)?);
    println!("{}", formatter.success(&format!("Wrote {} row(s) for actor {}", written, id)));
    Ok(())
}
