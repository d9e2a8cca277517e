//! Text normalization shared by every matcher

/// Normalize free text for comparison.
///
/// Lowercases, folds typographic apostrophes to `'` and collapses every run
/// of whitespace (including non-breaking spaces) to a single space.
///
/// # Examples
///
/// ```
/// use parentele_domain::normalize;
///
/// assert_eq!(normalize("  Fille de  l’Époux "), "fille de l'époux");
/// ```
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| match c {
            '\u{2019}' | '\u{02bc}' | '\u{2018}' | '`' | '\u{b4}' => '\'',
            c => c,
        })
        .flat_map(char::to_lowercase)
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
