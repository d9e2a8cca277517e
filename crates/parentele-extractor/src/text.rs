//! Small tokenizer and matchers over normalized relation phrases
//!
//! Every function here expects text already passed through
//! [`parentele_domain::normalize`]: lowercase, single ASCII spaces, no
//! leading or trailing whitespace. Vocabulary entries are matched on word
//! boundaries; an entry ending in an elision (`'`) or an abbreviation dot
//! needs no space after it.

use crate::lexicon::Lexicon;

/// A phrase fragment cut at its possessive determinant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// Text before the determinant: relation word and precision
    pub avant: &'a str,

    /// Determinant the fragment was cut at
    pub determinant: &'a str,

    /// Text after the determinant: titles, role and/or name of the target
    pub apres: &'a str,
}

/// Whether a vocabulary entry placed at `start` ends on a word boundary
fn ends_on_boundary(text: &str, entry: &str, start: usize) -> bool {
    if entry.ends_with('\'') || entry.ends_with('.') {
        return true;
    }
    matches!(text[start + entry.len()..].chars().next(), None | Some(' ') | Some(','))
}

/// Whether `text` ends with `entry` as a whole word
pub fn ends_with_word(text: &str, entry: &str) -> bool {
    if entry.is_empty() || !text.ends_with(entry) {
        return false;
    }
    let start = text.len() - entry.len();
    start == 0 || text[..start].ends_with(' ')
}

/// Longest vocabulary entry `text` starts with, and the text after it
pub fn longest_prefix<'v, 't>(text: &'t str, vocabulary: &'v [String]) -> Option<(&'v str, &'t str)> {
    vocabulary
        .iter()
        .filter(|entry| !entry.is_empty())
        .filter(|entry| text.starts_with(entry.as_str()) && ends_on_boundary(text, entry, 0))
        .max_by_key(|entry| entry.len())
        .map(|entry| (entry.as_str(), text[entry.len()..].trim_start()))
}

/// Split a phrase into independent fragments on `,` and ` et `
pub fn split_fragments(phrase: &str) -> Vec<&str> {
    phrase
        .split(',')
        .flat_map(|part| part.split(" et "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Longest determinant starting right after the space at byte `space`
fn determinant_at<'v>(fragment: &str, space: usize, lexicon: &'v Lexicon) -> Option<&'v str> {
    let start = space + 1;
    lexicon
        .determinants
        .iter()
        .filter(|d| !d.is_empty())
        .filter(|d| fragment[start..].starts_with(d.as_str()) && ends_on_boundary(fragment, d, start))
        .max_by_key(|d| d.len())
        .map(String::as_str)
}

/// Whether any determinant occurs in the phrase after a space
pub fn contains_determinant(phrase: &str, lexicon: &Lexicon) -> bool {
    phrase
        .match_indices(' ')
        .any(|(space, _)| determinant_at(phrase, space, lexicon).is_some())
}

/// Whether byte `at` falls inside a non-separable expression
fn inside_non_separable(fragment: &str, at: usize, lexicon: &Lexicon) -> bool {
    lexicon
        .non_separable
        .iter()
        .filter(|expr| !expr.is_empty())
        .any(|expr| {
            fragment
                .match_indices(expr.as_str())
                .any(|(start, _)| start <= at && at < start + expr.len())
        })
}

/// Whether `avant` ends with an honorific title ("m. de la fontaine")
fn ends_with_title(avant: &str, lexicon: &Lexicon) -> bool {
    lexicon.titles.iter().any(|title| ends_with_word(avant, title))
}

/// Find the split point of a fragment, scanning from the end.
///
/// At each position the longest determinant wins. Positions inside a
/// non-separable expression or right after a title are skipped so compound
/// names and expressions such as "issu de" stay whole. Both sides of the
/// split must be non-empty.
pub fn find_split<'a>(fragment: &'a str, lexicon: &'a Lexicon) -> Option<Split<'a>> {
    let spaces: Vec<usize> = fragment.match_indices(' ').map(|(i, _)| i).collect();

    for &space in spaces.iter().rev() {
        let Some(determinant) = determinant_at(fragment, space, lexicon) else {
            continue;
        };

        let avant = fragment[..space].trim_end();
        let apres = fragment[space + 1 + determinant.len()..].trim_start();
        if avant.is_empty() || apres.is_empty() {
            continue;
        }
        if inside_non_separable(fragment, space + 1, lexicon) {
            continue;
        }
        if ends_with_title(avant, lexicon) {
            continue;
        }

        return Some(Split {
            avant,
            determinant,
            apres,
        });
    }

    None
}

/// Strip leading honorific titles, returning them in order with the rest.
///
/// Stops before a title that would leave nothing behind, so a bare
/// "madame" is kept as text rather than silently emptied.
pub fn strip_titles<'v, 't>(text: &'t str, lexicon: &'v Lexicon) -> (Vec<&'v str>, &'t str) {
    let mut titles = Vec::new();
    let mut rest = text;

    while let Some((title, after)) = longest_prefix(rest, &lexicon.titles) {
        if after.is_empty() {
            break;
        }
        titles.push(title);
        rest = after;
    }

    (titles, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::default()
    }

    #[test]
    fn test_longest_prefix_prefers_longest_entry() {
        let lex = lexicon();
        assert_eq!(
            longest_prefix("grand-père paternel", &lex.relation_types),
            Some(("grand-père", "paternel"))
        );
        assert_eq!(
            longest_prefix("enfant légitimé", &lex.target_roles),
            Some(("enfant légitimé", ""))
        );
    }

    #[test]
    fn test_longest_prefix_respects_word_boundaries() {
        let vocab = vec!["fils".to_string()];
        assert_eq!(longest_prefix("filsx", &vocab), None);
        assert_eq!(longest_prefix("fils aîné", &vocab), Some(("fils", "aîné")));
    }

    #[test]
    fn test_split_fragments() {
        assert_eq!(
            split_fragments("oncle de l'époux, tante de l'épouse et cousin du père"),
            vec!["oncle de l'époux", "tante de l'épouse", "cousin du père"]
        );
        assert!(split_fragments(" , et ").is_empty());
    }

    #[test]
    fn test_contains_determinant() {
        let lex = lexicon();
        assert!(contains_determinant("fille de m. martin", &lex));
        assert!(contains_determinant("fils du défunt", &lex));
        assert!(!contains_determinant("tante des époux", &lex));
        assert!(!contains_determinant("parrain", &lex));
    }

    #[test]
    fn test_find_split_prefers_last_determinant() {
        let lex = lexicon();
        let split = find_split("fille de l'oncle de l'époux", &lex).unwrap();
        assert_eq!(split.avant, "fille de l'oncle");
        assert_eq!(split.determinant, "de l'");
        assert_eq!(split.apres, "époux");
    }

    #[test]
    fn test_find_split_longest_determinant() {
        let lex = lexicon();
        let split = find_split("fille de la défunte", &lex).unwrap();
        assert_eq!(split.determinant, "de la");
        assert_eq!(split.apres, "défunte");
    }

    #[test]
    fn test_find_split_skips_title_before_particle() {
        let lex = lexicon();
        let split = find_split("fils de m. de la fontaine", &lex).unwrap();
        assert_eq!(split.avant, "fils");
        assert_eq!(split.apres, "m. de la fontaine");
    }

    #[test]
    fn test_find_split_skips_non_separable() {
        let lex = lexicon();
        let split = find_split("cousin issu de germain de l'époux", &lex).unwrap();
        assert_eq!(split.avant, "cousin issu de germain");
        assert_eq!(split.apres, "époux");

        assert!(find_split("cousin issu de germain", &lex).is_none());
    }

    #[test]
    fn test_find_split_requires_both_sides() {
        let lex = lexicon();
        assert!(find_split("de l'époux", &lex).is_none());
        assert!(find_split("parrain", &lex).is_none());
    }

    #[test]
    fn test_strip_titles() {
        let lex = lexicon();
        assert_eq!(strip_titles("mme martin", &lex), (vec!["mme"], "martin"));
        assert_eq!(strip_titles("feu m. martin", &lex), (vec!["feu", "m."], "martin"));
        assert_eq!(strip_titles("la dame durand", &lex), (vec!["la dame"], "durand"));
        assert_eq!(strip_titles("madame", &lex), (Vec::<&str>::new(), "madame"));
        assert_eq!(strip_titles("martin", &lex), (Vec::<&str>::new(), "martin"));
    }

    #[test]
    fn test_ends_with_word() {
        assert!(ends_with_word("fils de m.", "m."));
        assert!(!ends_with_word("fils de mm.", "m."));
        assert!(ends_with_word("tante des époux", "des époux"));
        assert!(!ends_with_word("x", ""));
    }
}
