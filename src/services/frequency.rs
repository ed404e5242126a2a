use std::collections::HashMap;
use crate::models::{Alphabet, FrequencyTable};

/// Calculate the relative frequency of every alphabet character in a corpus.
///
/// Characters outside the alphabet are stripped before counting, so each value
/// is `occurrences / playable characters`. Letters that never occur are left
/// out of the table.
pub fn character_frequency(text: &str, alphabet: &Alphabet) -> FrequencyTable {
    let mut occurrences: HashMap<char, usize> = HashMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        if alphabet.contains(c) {
            *occurrences.entry(c).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return FrequencyTable::default();
    }

    let entries = alphabet
        .letters()
        .iter()
        .filter_map(|c| {
            occurrences
                .get(c)
                .map(|&n| (*c, n as f64 / total as f64))
        })
        .collect();
    FrequencyTable::new(entries)
}

/// Raw character counts of a text, ignoring digits, whitespace and punctuation.
///
/// Used when deciding by hand which letters a language should play with.
pub fn count_characters(text: &str) -> Vec<(char, usize)> {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphabetic() {
            *counts.entry(c).or_insert(0) += 1;
        }
    }
    let mut sorted: Vec<(char, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_ignores_foreign_characters() {
        let alphabet = Alphabet::new("eng", "abc").unwrap();
        let table = character_frequency("aab, c! xyz\n", &alphabet);
        assert_eq!(table.len(), 3);
        assert!((table.get('a') - 0.5).abs() < 1e-12);
        assert!((table.get('b') - 0.25).abs() < 1e-12);
        assert!((table.get('c') - 0.25).abs() < 1e-12);
        assert_eq!(table.get('x'), 0.0);
    }

    #[test]
    fn test_frequency_keeps_alphabet_order() {
        let alphabet = Alphabet::new("eng", "cba").unwrap();
        let table = character_frequency("abcccc", &alphabet);
        let order: Vec<char> = table.entries().iter().map(|(c, _)| *c).collect();
        assert_eq!(order, vec!['c', 'b', 'a']);
    }

    #[test]
    fn test_missing_letters_are_absent() {
        let alphabet = Alphabet::new("eng", "abcz").unwrap();
        let table = character_frequency("abc", &alphabet);
        assert_eq!(table.len(), 3);
        assert!(table.entries().iter().all(|(c, _)| *c != 'z'));
    }

    #[test]
    fn test_no_playable_characters() {
        let alphabet = Alphabet::new("eng", "abc").unwrap();
        assert!(character_frequency("xyz 123", &alphabet).is_empty());
        assert!(character_frequency("", &alphabet).is_empty());
    }

    #[test]
    fn test_count_characters() {
        let counts = count_characters("Hello, World 42!");
        assert_eq!(counts[0], ('l', 3));
        assert_eq!(counts[1], ('o', 2));
        assert!(counts.iter().all(|(c, _)| c.is_alphabetic()));
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 10);
    }
}
