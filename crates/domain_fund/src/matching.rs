//! Fuzzy fund-name matching
//!
//! Fund labels published with the daily rates are longer than the names
//! recorded in the transaction history and may differ in a letter or two
//! ("Globális részvény" vs "Globális Részvény Alap"). A label matches a fund
//! name when every word of the name has a counterpart in the label at most
//! one edit away.

/// Maximum edit distance between a fund-name word and a label word
pub const MAX_WORD_DISTANCE: usize = 1;

/// Levenshtein edit distance between two strings, counted in characters
///
/// # Example
///
/// ```rust
/// use domain_fund::matching::levenshtein;
///
/// assert_eq!(levenshtein("részvény", "Részvény"), 1);
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// ```
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Returns true if some word of `label` is within one edit of `word`
pub fn contains_similar_word(word: &str, label: &str) -> bool {
    label
        .split_whitespace()
        .any(|candidate| levenshtein(word, candidate) <= MAX_WORD_DISTANCE)
}

/// Returns true if every word of `fund_name` has a similar word in `label`
///
/// A name without any word never matches.
pub fn label_matches(fund_name: &str, label: &str) -> bool {
    let mut words = fund_name.split_whitespace().peekable();
    if words.peek().is_none() {
        return false;
    }
    words.all(|word| contains_similar_word(word, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("Alap", "Alap"), 0);
    }

    #[test]
    fn test_levenshtein_counts_characters_not_bytes() {
        assert_eq!(levenshtein("á", "a"), 1);
        assert_eq!(levenshtein("Kötvény", "Kotveny"), 2);
    }

    #[test]
    fn test_label_matches_all_words() {
        assert!(label_matches("Globális részvény", "Globális Részvény Alap"));
        assert!(!label_matches("Globális részvény", "Ingatlan Alap"));
        assert!(!label_matches("Globális részvény", "Globális Kötvény Alap"));
    }

    #[test]
    fn test_blank_name_never_matches() {
        assert!(!label_matches("", "Globális Részvény Alap"));
        assert!(!label_matches("   ", "Globális Részvény Alap"));
    }

    proptest! {
        #[test]
        fn levenshtein_is_symmetric(a in "[a-zA-Zéáő ]{0,12}", b in "[a-zA-Zéáő ]{0,12}") {
            prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
        }

        #[test]
        fn levenshtein_is_bounded_by_the_longer_string(a in "[a-zé]{0,12}", b in "[a-zé]{0,12}") {
            let distance = levenshtein(&a, &b);
            prop_assert!(distance <= a.chars().count().max(b.chars().count()));
            prop_assert_eq!(distance == 0, a == b);
        }

        #[test]
        fn name_matches_itself_inside_a_longer_label(name in "[A-Z][a-zé]{2,8}( [a-zé]{3,8}){0,2}") {
            let label = format!("{} Alap", name);
            prop_assert!(label_matches(&name, &label));
        }
    }
}
