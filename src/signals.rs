//! Text-signal derivation over article title and description.
//!
//! Two signals are computed per record: how often the search phrase occurs,
//! and whether a monetary amount is mentioned. Both are lexical heuristics,
//! not language-aware parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Monetary token: `$12`, `$12.34`, `100 dollars`, `42USD`, case-insensitive,
/// optional single space before the unit word. Not currency-aware.
static MONEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$\d+(?:\.\d{1,2})?|\d+\s?(?:dollars|USD)")
        .expect("money pattern is valid")
});

/// Count non-overlapping, case-insensitive occurrences of `phrase` in
/// `title` and `description`, summed.
///
/// An empty phrase yields 0. This is an explicit edge case: a substring
/// search would otherwise find the empty string between every character.
pub fn count_phrase(title: &str, description: &str, phrase: &str) -> usize {
    if phrase.is_empty() {
        return 0;
    }
    let needle = phrase.to_lowercase();
    title.to_lowercase().matches(needle.as_str()).count()
        + description.to_lowercase().matches(needle.as_str()).count()
}

/// Whether `title` or `description` contain a monetary token.
pub fn contains_money(title: &str, description: &str) -> bool {
    MONEY_RE.is_match(&format!("{title} {description}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_phrase_in_both_fields() {
        assert_eq!(count_phrase("Test title", "Test description", "test"), 2);
    }

    #[test]
    fn test_count_phrase_no_match() {
        assert_eq!(count_phrase("No match", "Still no match", "test"), 0);
    }

    #[test]
    fn test_count_phrase_empty_phrase_is_zero() {
        assert_eq!(count_phrase("Any title", "Any description", ""), 0);
        assert_eq!(count_phrase("", "", ""), 0);
    }

    #[test]
    fn test_count_phrase_case_insensitive_multiword() {
        assert_eq!(
            count_phrase(
                "Climate Change summit opens",
                "Leaders debate climate change policy amid CLIMATE CHANGE protests",
                "climate change"
            ),
            3
        );
    }

    #[test]
    fn test_count_phrase_non_overlapping() {
        // "aaaa" contains "aa" twice when matches may not overlap.
        assert_eq!(count_phrase("aaaa", "", "aa"), 2);
    }

    #[test]
    fn test_contains_money_dollar_sign() {
        assert!(contains_money("$100 in the title", "No money here"));
        assert!(contains_money("Budget cut", "Final price was $19.99"));
    }

    #[test]
    fn test_contains_money_unit_words() {
        assert!(contains_money("Worth 250 dollars", ""));
        assert!(contains_money("", "Raised 42 USD overnight"));
        assert!(contains_money("Fined 500usd by the court", ""));
    }

    #[test]
    fn test_contains_money_negative() {
        assert!(!contains_money("No money", "Still no money"));
        assert!(!contains_money("The dollar weakened", "USD index fell"));
    }
}
