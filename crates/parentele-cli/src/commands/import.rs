//! Import command implementation.

use crate::cli::ImportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use parentele_domain::{Actor, RelationCandidate};
use parentele_store::SqliteStore;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a JSON array of records from a file.
pub(crate) fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let json_data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json_data)?)
}

/// Execute the import command.
pub fn execute_import(args: ImportArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<()> {
    if args.actors.is_none() && args.candidates.is_none() {
        return Err(CliError::InvalidInput(
            "Must specify --actors, --candidates or both".to_string(),
        ));
    }

    // Actors first so that candidates can be resolved against them
    if let Some(path) = args.actors {
        let actors: Vec<Actor> = read_json(&path)?;
        let count = store.insert_actors(&actors)?;
        info!("Imported {} actors from {}", count, path);
        println!("{}", formatter.success(&format!("Imported {} actor(s)", count)));
    }

    if let Some(path) = args.candidates {
        let candidates: Vec<RelationCandidate> = read_json(&path)?;
        let count = store.insert_candidates(&candidates)?;
        info!("Imported {} relation candidates from {}", count, path);
        println!("{}", formatter.success(&format!("Imported {} relation candidate(s)", count)));
    }

    Ok(())
}
