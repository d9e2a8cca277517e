//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};

/// Parentèle CLI - Infer kinship relations from historical acts.
#[derive(Debug, Parser)]
#[command(name = "parentele")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database path
    #[arg(long, global = true, env = "PARENTELE_DB")]
    pub db: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import actors and relation candidates from JSON files
    Import(ImportArgs),

    /// Parse one relation phrase against a JSON actor list (no database)
    Extract(ExtractArgs),

    /// Recompute the relations of every act
    Recompute(RecomputeArgs),

    /// Recompute the relations of one act
    RecomputeAct(ActArgs),

    /// Recompute the relations of one actor after its phrase changed
    RecomputeActor(ActorArgs),

    /// List the relations stored for one act
    Relations(ActArgs),
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// JSON file holding an array of actors
    #[arg(long)]
    pub actors: Option<String>,

    /// JSON file holding an array of relation candidates
    #[arg(long)]
    pub candidates: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Relation phrase, e.g. "oncle de l'époux"
    pub lien: String,

    /// JSON file holding the act's actors
    #[arg(short, long)]
    pub actors: String,

    /// Act type, when not taken from the actors
    #[arg(long)]
    pub acte_type: Option<String>,

    /// Actor id the phrase belongs to; excluded from the targets
    #[arg(long)]
    pub source: Option<String>,
}

/// Arguments for the recompute command.
#[derive(Debug, Parser)]
pub struct RecomputeArgs {
    /// Compute and log without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Rows read per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Skip the rule engine
    #[arg(long)]
    pub no_rules: bool,
}

/// Arguments identifying one act.
#[derive(Debug, Parser)]
pub struct ActArgs {
    /// Act identifier
    pub acte_id: String,

    /// Table the act was transcribed into
    #[arg(short, long)]
    pub table: String,
}

/// Arguments for the recompute-actor command.
#[derive(Debug, Parser)]
pub struct ActorArgs {
    /// Actor identifier
    pub actor_id: String,

    /// New phrase; defaults to the stored candidate's phrase
    #[arg(short, long)]
    pub lien: Option<String>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "parentele",
            "extract",
            "oncle de l'époux",
            "--actors",
            "acte.json",
        ]);
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.lien, "oncle de l'époux");
                assert_eq!(args.actors, "acte.json");
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "parentele",
            "relations",
            "42",
            "--table",
            "actes_mariage",
            "--format",
            "json",
            "-vv",
            "--db",
            "test.db",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.db.as_deref(), Some("test.db"));
        assert!(matches!(cli.command, Command::Relations(ref a) if a.acte_id == "42"));
    }

    #[test]
    fn test_recompute_actor_command() {
        let cli = Cli::parse_from(["parentele", "recompute-actor", "a17", "--lien", "fils du défunt"]);
        match cli.command {
            Command::RecomputeActor(args) => {
                assert_eq!(args.actor_id, "a17");
                assert_eq!(args.lien.as_deref(), Some("fils du défunt"));
            }
            _ => panic!("Expected RecomputeActor command"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["parentele"]).is_err());
    }
}
