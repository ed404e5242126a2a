use std::collections::{HashMap, HashSet};
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::error::{LantError, Result};

/// A die has six sides; the game keeps its physical, off-line nature.
pub const FACES: usize = 6;

/// Folds a single character to the form used for matching words against a board.
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Folds a word character by character, so its length matches the unfolded word.
pub fn fold_word(word: &str) -> String {
    word.chars().map(fold_char).collect()
}

/// Ordered set of playable characters for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    pub fn new(language: &str, letters: &str) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for c in letters.chars().map(fold_char) {
            if !seen.insert(c) {
                return Err(LantError::InvalidAlphabet {
                    language: language.to_string(),
                    reason: format!("letter '{}' listed twice", c),
                });
            }
            ordered.push(c);
        }
        if ordered.is_empty() {
            return Err(LantError::InvalidAlphabet {
                language: language.to_string(),
                reason: "no letters".to_string(),
            });
        }
        Ok(Alphabet { letters: ordered })
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn contains(&self, c: char) -> bool {
        self.letters.contains(&c)
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.letters {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Relative frequency of each alphabet character found in a corpus,
/// kept in alphabet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(char, f64)>,
}

impl FrequencyTable {
    pub fn new(entries: Vec<(char, f64)>) -> Self {
        FrequencyTable { entries }
    }

    pub fn entries(&self) -> &[(char, f64)] {
        &self.entries
    }

    pub fn get(&self, c: char) -> f64 {
        self.entries
            .iter()
            .find(|(l, _)| *l == c)
            .map(|(_, f)| *f)
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Exact number of dice faces given to each letter, most frequent letter first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardComposition {
    counts: Vec<(char, usize)>,
}

impl BoardComposition {
    pub(crate) fn new(counts: Vec<(char, usize)>) -> Self {
        BoardComposition { counts }
    }

    pub fn counts(&self) -> &[(char, usize)] {
        &self.counts
    }

    pub fn count(&self, c: char) -> usize {
        self.counts
            .iter()
            .find(|(l, _)| *l == c)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// All the letters from all the dice in composition order.
    pub fn board_string(&self) -> Vec<char> {
        self.counts
            .iter()
            .flat_map(|&(c, n)| std::iter::repeat(c).take(n))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die(pub [char; FACES]);

impl Die {
    pub fn faces(&self) -> &[char; FACES] {
        &self.0
    }
}

/// Row-major matrix of the letters currently facing the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    /// Builds a grid from text rows, one character per cell.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len();
        if height == 0 {
            return Err(LantError::InvalidGrid("no rows".to_string()));
        }
        let width = rows[0].as_ref().chars().count();
        if width == 0 {
            return Err(LantError::InvalidGrid("empty row".to_string()));
        }
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(LantError::InvalidGrid(format!(
                    "row '{}' is not {} letters wide",
                    row, width
                )));
            }
            cells.extend(row.chars());
        }
        Ok(Grid { width, height, cells })
    }

    /// Reshapes rolled faces into a `board_size` × `board_size` board.
    pub fn square(faces: Vec<char>, board_size: usize) -> Result<Self> {
        if board_size == 0 || faces.len() != board_size * board_size {
            return Err(LantError::InvalidGrid(format!(
                "{} letters do not fill a {}x{} board",
                faces.len(),
                board_size,
                board_size
            )));
        }
        Ok(Grid {
            width: board_size,
            height: board_size,
            cells: faces,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Distinct letters on the board, case-folded.
    pub fn letters(&self) -> HashSet<char> {
        self.cells.iter().map(|&c| fold_char(c)).collect()
    }

    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows().join("\n"))
    }
}

/// Word list in usage order, most common words first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Dictionary {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Dictionary {
            words: words.into_iter().map(|w| fold_word(w.as_ref())).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// A word found on a board with one path of `(x, y)` cells spelling it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FoundWord {
    pub word: String,
    pub path: Vec<(usize, usize)>,
}

/// Outcome of one round: the mean word count and the dice set that scored it
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub average: f64,
    pub scrambled: Vec<char>,
}

impl RoundResult {
    pub fn dice_set(&self) -> String {
        self.scrambled.iter().collect()
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub dictionaries: HashMap<String, Dictionary>,
    pub min_word_length: usize,
    pub result_cap: usize,
}

#[derive(Serialize, Deserialize)]
pub struct LangInfo {
    pub code: String,
    pub word_count: usize,
}

#[derive(Serialize, Deserialize)]
pub struct SolverResponse {
    pub data: Vec<(String, Vec<(usize, usize)>)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_rejects_duplicates() {
        assert!(Alphabet::new("spa", "abcñdeñ").is_err());
        assert!(Alphabet::new("eng", "").is_err());
        let alphabet = Alphabet::new("eng", "ABC").unwrap();
        assert_eq!(alphabet.letters(), &['a', 'b', 'c']);
        assert!(alphabet.contains('b'));
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(&["ab", "cd", "ef"]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 2), Some('f'));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.to_string(), "ab\ncd\nef");

        assert!(Grid::from_rows(&["abc", "d"]).is_err());
        assert!(Grid::from_rows::<&str>(&[]).is_err());
    }

    #[test]
    fn test_grid_square() {
        let grid = Grid::square(vec!['a', 'b', 'c', 'd'], 2).unwrap();
        assert_eq!(grid.rows(), vec!["ab".to_string(), "cd".to_string()]);
        assert!(Grid::square(vec!['a', 'b', 'c'], 2).is_err());
    }

    #[test]
    fn test_grid_letters_are_folded() {
        let grid = Grid::from_rows(&["Aa", "bB"]).unwrap();
        let letters = grid.letters();
        assert_eq!(letters.len(), 2);
        assert!(letters.contains(&'a'));
        assert!(letters.contains(&'b'));
    }

    #[test]
    fn test_board_string_follows_composition_order() {
        let composition = BoardComposition::new(vec![('e', 3), ('a', 2), ('z', 1)]);
        assert_eq!(composition.total(), 6);
        assert_eq!(composition.board_string(), vec!['e', 'e', 'e', 'a', 'a', 'z']);
        assert_eq!(composition.count('a'), 2);
        assert_eq!(composition.count('q'), 0);
    }

    #[test]
    fn test_dictionary_lowercases() {
        let dictionary = Dictionary::new(["Lemma", "TEST"]);
        assert_eq!(dictionary.words(), &["lemma".to_string(), "test".to_string()]);
    }
}
