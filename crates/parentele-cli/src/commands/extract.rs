//! Extract command implementation.
//!
//! Parses one phrase against actors read from a JSON file, without touching
//! the database. Useful to tune a lexicon.

use crate::cli::ExtractArgs;
use crate::commands::import::read_json;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use parentele_domain::{ActeContext, ActeType, Actor, ActorId, RelationExtraction};
use parentele_extractor::Extractor;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let actors: Vec<Actor> = read_json(&args.actors)?;
    let extractor = config.extractor()?;
    let extractions = extract_phrase(&extractor, &args, &actors)?;
    println!("{}", formatter.format_extractions(&extractions)?);
    Ok(())
}

fn extract_phrase(extractor: &Extractor, args: &ExtractArgs, actors: &[Actor]) -> Result<Vec<RelationExtraction>> {
    let first = actors
        .first()
        .ok_or_else(|| CliError::InvalidInput("The actor file is empty".to_string()))?;

    let acte_type = match &args.acte_type {
        Some(label) => ActeType::parse(label),
        None => first.acte_type.clone(),
    };
    let context = ActeContext::new(first.scope(), acte_type);

    let candidates: Vec<Actor> = match &args.source {
        Some(source) => {
            let source = ActorId::new(source.as_str());
            if !actors.iter().any(|a| a.id == source) {
                return Err(CliError::NotFound(format!("Actor '{}' is not in the file", source)));
            }
            actors.iter().filter(|a| a.id != source).cloned().collect()
        }
        None => actors.to_vec(),
    };

    Ok(extractor.extract(&args.lien, &context, &candidates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parentele_domain::Statut;

    fn actor(id: &str, role: &str, prenom: &str) -> Actor {
        Actor {
            id: ActorId::new(id),
            acte_id: "3".to_string(),
            source_table: "actes_mariage".to_string(),
            nom: Some("Roux".to_string()),
            prenom: Some(prenom.to_string()),
            qualite: None,
            role: Some(role.to_string()),
            acte_type: ActeType::Mariage,
        }
    }

    fn args(lien: &str, source: Option<&str>) -> ExtractArgs {
        ExtractArgs {
            lien: lien.to_string(),
            actors: "unused.json".to_string(),
            acte_type: None,
            source: source.map(str::to_string),
        }
    }

    #[test]
    fn test_extract_against_file_actors() {
        let actors = [actor("e", "époux", "Jean"), actor("t", "témoin", "Luc")];
        let rows = extract_phrase(&Extractor::default(), &args("frère de l'époux", Some("t")), &actors).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].statut, Statut::Unique);
        assert_eq!(rows[0].acteur_cible_id, Some(ActorId::new("e")));
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let actors = [actor("e", "époux", "Jean")];
        let result = extract_phrase(&Extractor::default(), &args("frère de l'époux", Some("x")), &actors);
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let result = extract_phrase(&Extractor::default(), &args("frère de l'époux", None), &[]);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
