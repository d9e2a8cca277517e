//! Scenario tests for the Extractor over realistic acts

#[cfg(test)]
mod tests {
    use crate::{Extractor, Lexicon};
    use parentele_domain::{ActeContext, ActeScope, ActeType, Actor, ActorId, Statut};

    fn person(id: &str, role: &str, prenom: &str, nom: &str, acte_type: &ActeType) -> Actor {
        Actor {
            id: ActorId::new(id),
            acte_id: "7".to_string(),
            source_table: "registres".to_string(),
            nom: Some(nom.to_string()),
            prenom: Some(prenom.to_string()),
            qualite: None,
            role: Some(role.to_string()),
            acte_type: acte_type.clone(),
        }
    }

    fn marriage() -> (ActeContext, Vec<Actor>) {
        let t = ActeType::Mariage;
        let actors = vec![
            person("m1", "époux", "Pierre", "Durand", &t),
            person("m2", "épouse", "Marie", "Blanc", &t),
            person("m3", "père", "Jacques", "Durand", &t),
            person("m4", "mère", "Anne", "Roux", &t),
            person("m5", "témoin", "Louis", "Blanc", &t),
        ];
        (ActeContext::new(ActeScope::new("7", "registres"), t), actors)
    }

    fn ids(results: &[parentele_domain::RelationExtraction]) -> Vec<Option<&str>> {
        results
            .iter()
            .map(|r| r.acteur_cible_id.as_ref().map(ActorId::as_str))
            .collect()
    }

    #[test]
    fn test_marriage_witness_phrases() {
        let (context, actors) = marriage();
        let extractor = Extractor::default();

        let results = extractor.extract("Frère de l'épouse", &context, &actors);
        assert_eq!(ids(&results), vec![Some("m2")]);

        let results = extractor.extract("cousin germain des époux", &context, &actors);
        assert_eq!(ids(&results), vec![Some("m1"), Some("m2")]);
        assert!(results
            .iter()
            .all(|r| r.relation_precision.as_deref() == Some("germain")));

        let results = extractor.extract("beau-frère du père, ami de la mère", &context, &actors);
        assert_eq!(ids(&results), vec![Some("m3"), Some("m4")]);
        assert_eq!(results[0].relation_type.as_deref(), Some("beau-frère"));
        assert_eq!(results[1].relation_type.as_deref(), Some("ami"));
    }

    #[test]
    fn test_marriage_name_reference() {
        let (context, actors) = marriage();
        let results = Extractor::default().extract("neveu de Louis Blanc", &context, &actors);

        assert_eq!(results.len(), 1);
        assert_eq!(ids(&results), vec![Some("m5")]);
        assert_eq!(results[0].role_cible.as_deref(), Some("témoin"));
    }

    #[test]
    fn test_marriage_has_no_implicit_target() {
        let (context, actors) = marriage();
        let results = Extractor::default().extract("voisin", &context, &actors);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].statut, Statut::Erreur);
        assert_eq!(results[0].mention, "voisin");
    }

    #[test]
    fn test_typographic_apostrophe_is_folded() {
        let (context, actors) = marriage();
        let results = Extractor::default().extract("Oncle  de l’Époux", &context, &actors);

        assert_eq!(ids(&results), vec![Some("m1")]);
        assert_eq!(results[0].mention, "oncle de l'époux");
    }

    #[test]
    fn test_every_fragment_yields_one_result() {
        let (context, actors) = marriage();
        let results = Extractor::default().extract(
            "oncle de l'époux, xyz et tante de la mère",
            &context,
            &actors,
        );

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].statut, Statut::Unique);
        assert_eq!(results[1].statut, Statut::Erreur);
        assert_eq!(results[1].mention, "xyz");
        assert_eq!(results[2].statut, Statut::Unique);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let (context, actors) = marriage();
        let extractor = Extractor::default();
        let phrase = "tante des époux et cousin du témoin";

        assert_eq!(
            extractor.extract(phrase, &context, &actors),
            extractor.extract(phrase, &context, &actors)
        );
    }

    #[test]
    fn test_lexicon_loaded_from_toml() {
        let lexicon = Lexicon::from_toml(
            r#"
            couple_suffix = "des mariés"
            couple_targets = ["du marié", "de la mariée"]
            target_roles = ["marié", "mariée"]

            [role_synonyms]
            "époux" = "marié"
            "épouse" = "mariée"
            "#,
        )
        .unwrap();
        let extractor = Extractor::new(lexicon);
        let (context, actors) = marriage();

        let results = extractor.extract("témoin des mariés", &context, &actors);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].relation_type, None);

        let results = extractor.extract("ami des mariés", &context, &actors);
        assert_eq!(ids(&results), vec![Some("m1"), Some("m2")]);
        assert_eq!(results[0].role_cible.as_deref(), Some("marié"));
    }
}
