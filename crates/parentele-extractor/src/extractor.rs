//! Core Extractor implementation
//!
//! Turns one free-text relation phrase into ordered [`RelationExtraction`]s,
//! resolving each fragment's target against the actors of the same act.

use crate::lexicon::Lexicon;
use crate::text::{contains_determinant, ends_with_word, find_split, longest_prefix, split_fragments, strip_titles};
use parentele_domain::{normalize, ActeContext, ActeType, Actor, RelationExtraction, Statut};
use tracing::debug;

/// Outcome of resolving the text after a determinant
struct Resolution<'a> {
    role_cible: Option<String>,
    cible: Option<&'a Actor>,
    statut: Statut,
}

/// The Extractor segments relation phrases and disambiguates their targets
///
/// Extraction is a pure function of its inputs and never fails: phrases it
/// cannot handle come back as `erreur` extractions for manual review.
///
/// # Examples
///
/// ```
/// use parentele_domain::{ActeContext, ActeScope, ActeType, Actor, ActorId, Statut};
/// use parentele_extractor::Extractor;
///
/// let pere = Actor {
///     id: ActorId::new("p1"),
///     acte_id: "1".to_string(),
///     source_table: "actes".to_string(),
///     nom: Some("Martin".to_string()),
///     prenom: None,
///     qualite: None,
///     role: Some("père".to_string()),
///     acte_type: ActeType::Naissance,
/// };
/// let context = ActeContext::new(ActeScope::new("1", "actes"), ActeType::Naissance);
///
/// let extractor = Extractor::default();
/// let results = extractor.extract("fille de M. Martin", &context, &[pere]);
///
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].relation_type.as_deref(), Some("fille"));
/// assert_eq!(results[0].statut, Statut::Unique);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    lexicon: Lexicon,
}

impl Extractor {
    /// Create a new Extractor over the given lexicon
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon: lexicon.normalized(),
        }
    }

    /// The lexicon in use
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Extract relations from one phrase.
    ///
    /// `candidates` should be the other actors of the act; actors from a
    /// different act are ignored. A blank phrase yields nothing.
    pub fn extract(
        &self,
        lien: &str,
        context: &ActeContext,
        candidates: &[Actor],
    ) -> Vec<RelationExtraction> {
        let phrase = normalize(lien);
        if phrase.is_empty() {
            return Vec::new();
        }

        let candidates: Vec<&Actor> = candidates
            .iter()
            .filter(|actor| actor.belongs_to(&context.scope))
            .collect();

        let Some(phrase) = self.prepare_phrase(&phrase, &context.acte_type) else {
            debug!(
                "No determinant and no implicit target for '{}' ({} act {})",
                phrase, context.acte_type, context.scope
            );
            return vec![RelationExtraction::erreur(phrase)];
        };

        split_fragments(&phrase)
            .into_iter()
            .map(|fragment| self.extract_fragment(fragment, &context.acte_type, &candidates))
            .collect()
    }

    /// Expand "des époux" on marriage acts, then make sure the phrase names
    /// a target. Returns `None` when it cannot.
    fn prepare_phrase(&self, phrase: &str, acte_type: &ActeType) -> Option<String> {
        let suffix = self.lexicon.couple_suffix.as_str();
        let mut phrase = phrase.to_string();

        if *acte_type == ActeType::Mariage && ends_with_word(&phrase, suffix) {
            let head = phrase[..phrase.len() - suffix.len()].trim_end();
            if !head.is_empty() {
                let expanded = self
                    .lexicon
                    .couple_targets
                    .iter()
                    .map(|target| format!("{} {}", head, target))
                    .collect::<Vec<_>>()
                    .join(" et ");
                phrase = expanded;
            }
        }

        if contains_determinant(&phrase, &self.lexicon) {
            return Some(phrase);
        }

        self.lexicon
            .implicit_target(acte_type)
            .map(|target| format!("{} {}", phrase, target))
    }

    fn extract_fragment(
        &self,
        fragment: &str,
        acte_type: &ActeType,
        candidates: &[&Actor],
    ) -> RelationExtraction {
        let retried: String;
        let split = match find_split(fragment, &self.lexicon) {
            Some(split) => split,
            None => {
                let Some(target) = self.lexicon.implicit_target(acte_type) else {
                    debug!("No split point in '{}'", fragment);
                    return RelationExtraction::erreur(fragment);
                };
                retried = format!("{} {}", fragment, target);
                match find_split(&retried, &self.lexicon) {
                    Some(split) => split,
                    None => {
                        debug!("No split point in '{}', even with '{}'", fragment, target);
                        return RelationExtraction::erreur(fragment);
                    }
                }
            }
        };

        let Some((relation_type, precision)) =
            longest_prefix(split.avant, &self.lexicon.relation_types)
        else {
            debug!("Unknown relation word in '{}'", split.avant);
            return RelationExtraction::erreur(fragment);
        };

        let relation_precision = if precision.is_empty() || precision == self.lexicon.couple_suffix {
            None
        } else {
            Some(precision.to_string())
        };

        let resolution = self.resolve_target(split.apres, candidates);
        debug!(
            "'{}' -> {} -> {:?} ({})",
            fragment,
            relation_type,
            resolution.cible.map(|a| a.id.as_str()),
            resolution.statut
        );

        RelationExtraction {
            relation_type: Some(relation_type.to_string()),
            relation_precision,
            role_cible: resolution.role_cible,
            acteur_cible_id: resolution.cible.map(|a| a.id.clone()),
            acteur_cible_role: resolution.cible.and_then(|a| a.role.clone()),
            statut: resolution.statut,
            mention: fragment.to_string(),
        }
    }

    /// Resolve the target named after the determinant.
    ///
    /// Order: strip titles, take a leading role word, match the remaining
    /// tokens against full names, and fall back to matching the role.
    fn resolve_target<'a>(&self, apres: &str, candidates: &[&'a Actor]) -> Resolution<'a> {
        let (titles, rest) = strip_titles(apres, &self.lexicon);
        let qualite = titles
            .iter()
            .find_map(|title| self.lexicon.qualite_for_title(title));

        let (role_cible, name) = match longest_prefix(rest, &self.lexicon.target_roles) {
            Some((role, name)) => (Some(role), name),
            None => (None, rest),
        };

        if !name.is_empty() {
            let homonyms: Vec<&'a Actor> = candidates
                .iter()
                .copied()
                .filter(|actor| actor.full_name().map(|n| normalize(&n)).as_deref() == Some(name))
                .collect();

            match homonyms.as_slice() {
                [] => {}
                [actor] => return Self::resolved(role_cible, *actor),
                _ => {
                    let narrowed: Vec<&'a Actor> = match qualite {
                        Some(qualite) => homonyms
                            .iter()
                            .copied()
                            .filter(|actor| {
                                actor.qualite.as_deref().map(normalize).as_deref() == Some(qualite)
                            })
                            .collect(),
                        None => Vec::new(),
                    };

                    if let [actor] = narrowed.as_slice() {
                        return Self::resolved(role_cible, *actor);
                    }

                    debug!("{} actors named '{}', cannot disambiguate", homonyms.len(), name);
                    return Resolution {
                        role_cible: role_cible.map(str::to_string),
                        cible: None,
                        statut: Statut::Erreur,
                    };
                }
            }
        }

        let Some(role) = role_cible else {
            return Resolution {
                role_cible: None,
                cible: None,
                statut: Statut::Introuvable,
            };
        };

        let wanted = self.lexicon.canonical_role(role);
        let holders: Vec<&'a Actor> = candidates
            .iter()
            .copied()
            .filter(|actor| self.lexicon.canonical_role(&normalize(actor.role_str())) == wanted)
            .collect();

        match holders.as_slice() {
            [actor] => Self::resolved(Some(role), *actor),
            [] => Resolution {
                role_cible: Some(role.to_string()),
                cible: None,
                statut: Statut::Introuvable,
            },
            _ => Resolution {
                role_cible: Some(role.to_string()),
                cible: None,
                statut: Statut::Ambigu,
            },
        }
    }

    fn resolved<'a>(role_cible: Option<&str>, actor: &'a Actor) -> Resolution<'a> {
        Resolution {
            role_cible: role_cible.map(str::to_string).or_else(|| actor.role.clone()),
            cible: Some(actor),
            statut: Statut::Unique,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parentele_domain::{ActeScope, ActorId};

    fn actor(id: &str, role: &str, prenom: Option<&str>, nom: Option<&str>) -> Actor {
        Actor {
            id: ActorId::new(id),
            acte_id: "1".to_string(),
            source_table: "actes".to_string(),
            nom: nom.map(str::to_string),
            prenom: prenom.map(str::to_string),
            qualite: None,
            role: Some(role.to_string()),
            acte_type: ActeType::Naissance,
        }
    }

    fn with_qualite(mut actor: Actor, qualite: &str) -> Actor {
        actor.qualite = Some(qualite.to_string());
        actor
    }

    fn context(acte_type: ActeType) -> ActeContext {
        ActeContext::new(ActeScope::new("1", "actes"), acte_type)
    }

    fn extract(lien: &str, acte_type: ActeType, actors: &[Actor]) -> Vec<RelationExtraction> {
        Extractor::default().extract(lien, &context(acte_type), actors)
    }

    #[test]
    fn test_name_match_through_title() {
        let pere = actor("p1", "père", None, Some("Martin"));
        let results = extract("fille de M. Martin", ActeType::Naissance, &[pere]);

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_eq!(r.relation_type.as_deref(), Some("fille"));
        assert_eq!(r.role_cible.as_deref(), Some("père"));
        assert_eq!(r.acteur_cible_id.as_ref().map(ActorId::as_str), Some("p1"));
        assert_eq!(r.statut, Statut::Unique);
    }

    #[test]
    fn test_implicit_target_on_birth_act() {
        let enfant = actor("e1", "enfant", Some("Louis"), Some("Martin"));
        let results = extract("parrain", ActeType::Naissance, &[enfant]);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relation_type.as_deref(), Some("parrain"));
        assert_eq!(results[0].role_cible.as_deref(), Some("enfant"));
        assert_eq!(results[0].statut, Statut::Unique);
        assert_eq!(results[0].mention, "parrain de l'enfant");
    }

    #[test]
    fn test_implicit_target_on_death_act() {
        let defunte = actor("d1", "défunte", Some("Jeanne"), Some("Roux"));
        let results = extract("Nièce", ActeType::Deces, &[defunte]);

        assert_eq!(results[0].relation_type.as_deref(), Some("nièce"));
        assert_eq!(results[0].role_cible.as_deref(), Some("défunt"));
        // "défunte" and "défunt" are the same role for matching
        assert_eq!(results[0].statut, Statut::Unique);
        assert_eq!(results[0].acteur_cible_role.as_deref(), Some("défunte"));
    }

    #[test]
    fn test_no_determinant_on_other_act_is_error() {
        let results = extract("voisin", ActeType::Autre("contrat".to_string()), &[]);
        assert_eq!(results, vec![RelationExtraction::erreur("voisin")]);
    }

    #[test]
    fn test_blank_phrase_yields_nothing() {
        assert!(extract("   ", ActeType::Naissance, &[]).is_empty());
    }

    #[test]
    fn test_couple_expansion_on_marriage() {
        let epoux = actor("m1", "époux", Some("Pierre"), Some("Durand"));
        let epouse = actor("m2", "épouse", Some("Marie"), Some("Blanc"));
        let results = extract("tante des époux", ActeType::Mariage, &[epoux, epouse]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].mention, "tante de l'époux");
        assert_eq!(results[0].acteur_cible_id.as_ref().map(ActorId::as_str), Some("m1"));
        assert_eq!(results[1].mention, "tante de l'épouse");
        assert_eq!(results[1].acteur_cible_id.as_ref().map(ActorId::as_str), Some("m2"));
        assert!(results.iter().all(|r| r.relation_type.as_deref() == Some("tante")));
        assert!(results.iter().all(|r| r.statut == Statut::Unique));
    }

    #[test]
    fn test_fragments_resolve_independently() {
        let pere = actor("p1", "père", Some("Jean"), Some("Martin"));
        let mere = actor("p2", "mère", Some("Anne"), Some("Roux"));
        let results = extract("oncle du père et cousin de la mère", ActeType::Naissance, &[pere, mere]);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].relation_type.as_deref(), Some("oncle"));
        assert_eq!(results[0].acteur_cible_id.as_ref().map(ActorId::as_str), Some("p1"));
        assert_eq!(results[1].relation_type.as_deref(), Some("cousin"));
        assert_eq!(results[1].acteur_cible_id.as_ref().map(ActorId::as_str), Some("p2"));
    }

    #[test]
    fn test_homonyms_without_title_are_error() {
        let a = actor("t1", "témoin", Some("Jean"), Some("Martin"));
        let b = actor("t2", "témoin", Some("Jean"), Some("Martin"));
        let results = extract("cousin de Jean Martin", ActeType::Naissance, &[a, b]);

        assert_eq!(results[0].statut, Statut::Erreur);
        assert!(results[0].acteur_cible_id.is_none());
        assert_eq!(results[0].relation_type.as_deref(), Some("cousin"));
    }

    #[test]
    fn test_homonyms_narrowed_by_title_qualite() {
        let a = with_qualite(actor("t1", "témoin", Some("Claude"), Some("Martin")), "sieur");
        let b = with_qualite(actor("t2", "témoin", Some("Claude"), Some("Martin")), "Dame");
        let results = extract("sœur de Mme Claude Martin", ActeType::Naissance, &[a, b]);

        assert_eq!(results[0].statut, Statut::Unique);
        assert_eq!(results[0].acteur_cible_id.as_ref().map(ActorId::as_str), Some("t2"));
    }

    #[test]
    fn test_title_without_qualite_stays_error() {
        let a = actor("t1", "témoin", Some("Claude"), Some("Martin"));
        let b = actor("t2", "témoin", Some("Claude"), Some("Martin"));
        let results = extract("voisin de maître Claude Martin", ActeType::Naissance, &[a, b]);
        assert_eq!(results[0].statut, Statut::Erreur);
    }

    #[test]
    fn test_role_fallback_ambiguous_and_missing() {
        let t1 = actor("t1", "témoin", Some("Paul"), Some("Roy"));
        let t2 = actor("t2", "témoin", Some("Luc"), Some("Roy"));

        let results = extract("frère du témoin", ActeType::Naissance, &[t1, t2]);
        assert_eq!(results[0].statut, Statut::Ambigu);
        assert_eq!(results[0].role_cible.as_deref(), Some("témoin"));

        let results = extract("frère du déclarant", ActeType::Naissance, &[]);
        assert_eq!(results[0].statut, Statut::Introuvable);
        assert_eq!(results[0].role_cible.as_deref(), Some("déclarant"));
    }

    #[test]
    fn test_role_then_name() {
        let t1 = actor("t1", "témoin", Some("Paul"), Some("Roy"));
        let t2 = actor("t2", "témoin", Some("Luc"), Some("Roy"));
        let results = extract("frère du témoin Luc Roy", ActeType::Naissance, &[t1, t2]);

        assert_eq!(results[0].statut, Statut::Unique);
        assert_eq!(results[0].acteur_cible_id.as_ref().map(ActorId::as_str), Some("t2"));
        assert_eq!(results[0].role_cible.as_deref(), Some("témoin"));
    }

    #[test]
    fn test_unknown_name_is_introuvable() {
        let pere = actor("p1", "père", Some("Jean"), Some("Martin"));
        let results = extract("fils de Pierre Inconnu", ActeType::Naissance, &[pere]);
        assert_eq!(results[0].statut, Statut::Introuvable);
        assert!(results[0].role_cible.is_none());
    }

    #[test]
    fn test_sentinel_surname_is_not_matched() {
        let marie = actor("x1", "témoin", Some("Marie"), Some("? SANS NOM"));
        let results = extract("tante de Marie", ActeType::Naissance, &[marie.clone()]);
        assert_eq!(results[0].statut, Statut::Unique);

        let results = extract("tante de Marie ? SANS NOM", ActeType::Naissance, &[marie]);
        assert_eq!(results[0].statut, Statut::Introuvable);
    }

    #[test]
    fn test_precision_kept_and_couple_precision_dropped() {
        let epoux = actor("m1", "époux", Some("Pierre"), Some("Durand"));
        let results = extract("cousin germain de l'époux", ActeType::Mariage, &[epoux.clone()]);
        assert_eq!(results[0].relation_type.as_deref(), Some("cousin"));
        assert_eq!(results[0].relation_precision.as_deref(), Some("germain"));

        let results = extract("ami des époux de l'époux", ActeType::Mariage, &[epoux]);
        assert_eq!(results[0].relation_type.as_deref(), Some("ami"));
        assert!(results[0].relation_precision.is_none());
    }

    #[test]
    fn test_non_separable_retry_with_default() {
        let enfant = actor("e1", "enfant", Some("Louis"), Some("Martin"));
        let results = extract("cousin issu de germain", ActeType::Naissance, &[enfant]);

        assert_eq!(results[0].relation_type.as_deref(), Some("cousin"));
        assert_eq!(results[0].relation_precision.as_deref(), Some("issu de germain"));
        assert_eq!(results[0].statut, Statut::Unique);
    }

    #[test]
    fn test_compound_name_with_particle() {
        let pere = actor("p1", "père", None, Some("de La Fontaine"));
        let results = extract("fils de M. de La Fontaine", ActeType::Naissance, &[pere]);
        assert_eq!(results[0].statut, Statut::Unique);
        assert_eq!(results[0].acteur_cible_id.as_ref().map(ActorId::as_str), Some("p1"));
    }

    #[test]
    fn test_unknown_relation_word_is_error() {
        let pere = actor("p1", "père", None, Some("Martin"));
        let results = extract("associé du père", ActeType::Naissance, &[pere]);
        assert_eq!(results[0].statut, Statut::Erreur);
        assert!(results[0].relation_type.is_none());
    }

    #[test]
    fn test_candidates_from_other_acts_are_ignored() {
        let mut other = actor("z1", "père", None, Some("Martin"));
        other.acte_id = "2".to_string();
        let results = extract("fille du père", ActeType::Naissance, &[other]);
        assert_eq!(results[0].statut, Statut::Introuvable);
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = Lexicon::from_toml(r#"relation_types = ["associé"]"#).unwrap();
        let extractor = Extractor::new(lexicon);
        let pere = actor("p1", "père", None, Some("Martin"));
        let results = extractor.extract("associé du père", &context(ActeType::Naissance), &[pere]);
        assert_eq!(results[0].relation_type.as_deref(), Some("associé"));
        assert_eq!(results[0].statut, Statut::Unique);
    }
}
