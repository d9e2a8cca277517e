//! Closed vocabulary the segmenter recognizes
//!
//! Every entry is compared against normalized text (see
//! [`parentele_domain::normalize`]), so a lexicon loaded from TOML is
//! normalized before use and entries may be written with any casing.

use crate::error::ExtractorError;
use parentele_domain::{normalize, ActeType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Vocabulary used to segment and resolve relation phrases
///
/// # Examples
///
/// ```
/// use parentele_extractor::Lexicon;
///
/// let lexicon = Lexicon::from_toml(r#"relation_types = ["Parrain", "Voisin"]"#).unwrap();
/// assert_eq!(lexicon.relation_types, vec!["parrain", "voisin"]);
/// // Everything not overridden keeps the built-in vocabulary
/// assert!(lexicon.target_roles.contains(&"enfant".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Kinship and social relation words ("fille", "tante", "parrain", ...)
    pub relation_types: Vec<String>,

    /// Roles a phrase can point at ("époux", "enfant", "défunt", ...)
    pub target_roles: Vec<String>,

    /// Honorific titles stripped before resolving a target
    pub titles: Vec<String>,

    /// Possessive determinants marking the split point ("de l'", "du", ...)
    pub determinants: Vec<String>,

    /// Expressions whose "de" is never a split point ("issu de", ...)
    pub non_separable: Vec<String>,

    /// Suffix designating both spouses on a marriage act
    pub couple_suffix: String,

    /// Per-spouse replacements for [`Lexicon::couple_suffix`]
    pub couple_targets: Vec<String>,

    /// Titles that determine a qualité, used to narrow homonyms
    pub title_qualites: BTreeMap<String, String>,

    /// Role spellings folded onto one canonical role for matching
    pub role_synonyms: BTreeMap<String, String>,

    /// Determinant + target appended when a phrase names no target, per act type
    pub implicit_targets: BTreeMap<String, String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for Lexicon {
    /// Built-in French vocabulary for civil-status and notarial records
    fn default() -> Self {
        Self {
            relation_types: strings(&[
                "père", "mère", "fils", "fille", "enfant", "frère", "sœur", "soeur",
                "demi-frère", "demi-sœur", "demi-soeur", "oncle", "tante", "grand-oncle",
                "grand-tante", "neveu", "nièce", "petit-neveu", "petite-nièce", "cousin",
                "cousine", "grand-père", "grand-mère", "arrière-grand-père",
                "arrière-grand-mère", "aïeul", "aïeule", "petit-fils", "petite-fille",
                "beau-père", "belle-mère", "beau-frère", "belle-sœur", "belle-soeur",
                "beau-fils", "belle-fille", "gendre", "bru", "époux", "épouse", "mari",
                "femme", "veuf", "veuve", "parrain", "marraine", "filleul", "filleule",
                "tuteur", "tutrice", "subrogé tuteur", "curateur", "voisin", "voisine",
                "ami", "amie", "maître", "domestique", "serviteur", "servante",
            ]),
            target_roles: strings(&[
                "enfant", "enfant légitimé", "défunt", "défunte", "époux", "épouse",
                "père", "mère", "déclarant", "déclarante", "témoin", "parrain", "marraine",
                "mari", "femme", "veuf", "veuve", "comparant", "comparante",
            ]),
            titles: strings(&[
                "m.", "m", "mr", "mr.", "monsieur", "mme", "mme.", "madame", "mlle",
                "mlle.", "melle", "mademoiselle", "sieur", "sr", "sr.", "le sieur", "dame",
                "la dame", "demoiselle", "dlle", "maître", "me", "me.", "feu", "feue",
            ]),
            title_qualites: pairs(&[
                ("m.", "sieur"),
                ("m", "sieur"),
                ("mr", "sieur"),
                ("mr.", "sieur"),
                ("monsieur", "sieur"),
                ("sieur", "sieur"),
                ("sr", "sieur"),
                ("sr.", "sieur"),
                ("le sieur", "sieur"),
                ("mme", "dame"),
                ("mme.", "dame"),
                ("madame", "dame"),
                ("dame", "dame"),
                ("la dame", "dame"),
                ("mlle", "demoiselle"),
                ("mlle.", "demoiselle"),
                ("melle", "demoiselle"),
                ("mademoiselle", "demoiselle"),
                ("demoiselle", "demoiselle"),
                ("dlle", "demoiselle"),
            ]),
            determinants: strings(&["de l'", "de la", "du", "de"]),
            non_separable: strings(&[
                "issu de", "issue de", "issus de", "issues de", "fondé de pouvoir",
                "fondée de pouvoir", "chargé de", "chargée de", "tenant lieu de",
            ]),
            role_synonyms: pairs(&[
                ("défunte", "défunt"),
                ("déclarante", "déclarant"),
                ("comparante", "comparant"),
            ]),
            implicit_targets: pairs(&[
                ("naissance", "de l'enfant"),
                ("décès", "du défunt"),
            ]),
            couple_suffix: "des époux".to_string(),
            couple_targets: strings(&["de l'époux", "de l'épouse"]),
        }
    }
}

impl Lexicon {
    /// Load a lexicon from a TOML string; missing keys keep their defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let lexicon: Lexicon = toml::from_str(toml_str)?;
        let lexicon = lexicon.normalized();
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Serialize the lexicon to a TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the lexicon
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.relation_types.is_empty() {
            return Err(ExtractorError::InvalidLexicon(
                "relation_types must not be empty".to_string(),
            ));
        }
        if self.determinants.is_empty() {
            return Err(ExtractorError::InvalidLexicon(
                "determinants must not be empty".to_string(),
            ));
        }
        if self.determinants.iter().any(|d| d.is_empty()) {
            return Err(ExtractorError::InvalidLexicon(
                "determinants must not contain blank entries".to_string(),
            ));
        }
        if self.relation_types.iter().any(|r| r.is_empty()) {
            return Err(ExtractorError::InvalidLexicon(
                "relation_types must not contain blank entries".to_string(),
            ));
        }
        if !self.couple_suffix.is_empty() && self.couple_targets.is_empty() {
            return Err(ExtractorError::InvalidLexicon(
                "couple_targets must not be empty when couple_suffix is set".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalize every entry so it compares against normalized text
    pub fn normalized(self) -> Self {
        let list = |items: Vec<String>| -> Vec<String> {
            let mut out: Vec<String> = Vec::with_capacity(items.len());
            for item in items.iter().map(|s| normalize(s)) {
                if !item.is_empty() && !out.contains(&item) {
                    out.push(item);
                }
            }
            out
        };
        let map = |items: BTreeMap<String, String>| -> BTreeMap<String, String> {
            items
                .into_iter()
                .map(|(k, v)| (normalize(&k), normalize(&v)))
                .collect()
        };

        Self {
            relation_types: list(self.relation_types),
            target_roles: list(self.target_roles),
            titles: list(self.titles),
            title_qualites: map(self.title_qualites),
            determinants: list(self.determinants),
            non_separable: list(self.non_separable),
            role_synonyms: map(self.role_synonyms),
            implicit_targets: map(self.implicit_targets),
            couple_suffix: normalize(&self.couple_suffix),
            couple_targets: list(self.couple_targets),
        }
    }

    /// Canonical spelling of a normalized role
    pub fn canonical_role<'a>(&'a self, role: &'a str) -> &'a str {
        self.role_synonyms
            .get(role)
            .map(String::as_str)
            .unwrap_or(role)
    }

    /// Qualité implied by a normalized title, if the title determines one
    pub fn qualite_for_title(&self, title: &str) -> Option<&str> {
        self.title_qualites.get(title).map(String::as_str)
    }

    /// Determinant + target appended when a phrase of this act type names no target
    pub fn implicit_target(&self, acte_type: &ActeType) -> Option<&str> {
        self.implicit_targets
            .get(&normalize(acte_type.as_str()))
            .map(String::as_str)
    }
}
