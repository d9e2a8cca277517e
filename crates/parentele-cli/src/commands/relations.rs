//! Relations command implementation.

use crate::cli::ActArgs;
use crate::error::Result;
use crate::output::Formatter;
use parentele_domain::{ActeScope, RelationStore};
use parentele_store::SqliteStore;

/// Execute the relations command.
pub fn execute_relations(args: ActArgs, store: &SqliteStore, formatter: &Formatter) -> Result<()> {
    let scope = ActeScope::new(args.acte_id, args.table);
    let rows = store.fetch_existing_relations(&scope)?;
    println!("{}", formatter.format_relations(&rows)?);
    Ok(())
}
