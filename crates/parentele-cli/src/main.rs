//! Parentèle CLI - Command-line interface for kinship relation inference.

use clap::Parser;
use parentele_cli::commands;
use parentele_cli::{Cli, Command, Config, Formatter};
use parentele_store::SqliteStore;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so that stdout stays parseable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> parentele_cli::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let database = cli.db.unwrap_or_else(|| config.database.clone());
    let open_store = || -> parentele_cli::Result<SqliteStore> {
        tracing::debug!("Opening database {}", database);
        Ok(SqliteStore::new(&database)?)
    };

    match cli.command {
        // Extraction works on files only
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter),
        Command::Import(args) => commands::execute_import(args, &mut open_store()?, &formatter),
        Command::Recompute(args) => {
            commands::execute_recompute(args, &mut open_store()?, &config, &formatter)
        }
        Command::RecomputeAct(args) => {
            commands::execute_recompute_act(args, &mut open_store()?, &config, &formatter)
        }
        Command::RecomputeActor(args) => {
            commands::execute_recompute_actor(args, &mut open_store()?, &config, &formatter)
        }
        Command::Relations(args) => commands::execute_relations(args, &open_store()?, &formatter),
    }
}
