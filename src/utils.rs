use std::collections::HashSet;
use std::time::Instant;
use log::debug;

/// Check if a word is spelled entirely with the given letters.
/// Any letter may be reused; only membership is checked.
pub fn uses_only_letters(word: &str, letters: &HashSet<char>) -> bool {
    word.chars().all(|c| letters.contains(&c))
}

/// Cheap whole-word filter applied before searching a board: the word is long
/// enough and uses no letter missing from the board.
pub fn is_bogglable(word: &str, letters: &HashSet<char>, min_word_length: usize) -> bool {
    word.chars().count() >= min_word_length && uses_only_letters(word, letters)
}

/// Run `f`, logging how long it took at debug level.
pub fn elapsed<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = Instant::now();
    let result = f();
    debug!("{} {:?}", label, start.elapsed());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(s: &str) -> HashSet<char> {
        s.chars().collect()
    }

    #[test]
    fn test_uses_only_letters() {
        assert!(uses_only_letters("lemma", &letters("lema")));
        assert!(uses_only_letters("", &letters("abc")));
        assert!(uses_only_letters("kayak", &letters("kay")));
        assert!(!uses_only_letters("kayak", &letters("ka")));
        assert!(!uses_only_letters("hello", &letters("HELO")));
    }

    #[test]
    fn test_is_bogglable() {
        let board = letters("tesklam");
        assert!(is_bogglable("test", &board, 4));
        assert!(!is_bogglable("test", &board, 5));
        assert!(is_bogglable("lemma", &board, 5));
        assert!(!is_bogglable("kayak", &board, 5));
    }

    #[test]
    fn test_is_bogglable_counts_characters_not_bytes() {
        let board = letters("żółw");
        assert!(is_bogglable("żółw", &board, 4));
        assert!(!is_bogglable("żółw", &board, 5));
    }

    #[test]
    fn test_elapsed_returns_value() {
        assert_eq!(elapsed("took", || 2 + 2), 4);
    }
}
