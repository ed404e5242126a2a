use std::collections::HashSet;
use log::debug;
use crate::models::{fold_char, Dictionary, FoundWord, Grid};
use crate::utils::is_bogglable;

/// Offsets of the eight cells touching a cell, diagonals included.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Finds every dictionary word that can be traced on a board.
///
/// Only words made of the board's letters and at least `min_word_length` long
/// are kept, and every prefix of them (two letters and up) is indexed so that
/// the search can abandon a path as soon as no word continues it.
pub struct Solver {
    width: usize,
    height: usize,
    cells: Vec<char>,
    words: HashSet<String>,
    prefixes: HashSet<String>,
}

impl Solver {
    pub fn new(grid: &Grid, min_word_length: usize, dictionary: &Dictionary) -> Self {
        let letters = grid.letters();
        let words: HashSet<String> = dictionary
            .words()
            .iter()
            .filter(|word| is_bogglable(word, &letters, min_word_length))
            .cloned()
            .collect();
        debug!("Word list cut down to {} words.", words.len());

        let mut prefixes = HashSet::new();
        for word in &words {
            for (n, (i, c)) in word.char_indices().enumerate() {
                if n >= 1 {
                    prefixes.insert(word[..i + c.len_utf8()].to_string());
                }
            }
        }

        Solver {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().iter().map(|&c| fold_char(c)).collect(),
            words,
            prefixes,
        }
    }

    /// Number of dictionary words that passed the letter filter.
    pub fn candidate_count(&self) -> usize {
        self.words.len()
    }

    /// Lazily walk the board, yielding each distinct word once with one path.
    pub fn solve(&self) -> Solutions<'_> {
        Solutions {
            solver: self,
            next_start: 0,
            stack: Vec::new(),
            visited: vec![false; self.cells.len()],
            prefix: String::new(),
            seen: HashSet::new(),
        }
    }

    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        self.solve().map(|found| found.word)
    }

    fn neighbour(&self, cell: usize, direction: usize) -> Option<usize> {
        let (dx, dy) = NEIGHBOURS[direction];
        let x = (cell % self.width).checked_add_signed(dx)?;
        let y = (cell / self.width).checked_add_signed(dy)?;
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    fn coordinates(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }
}

struct Frame {
    cell: usize,
    next_direction: usize,
}

/// Depth-first search state. The current path lives on `stack`, its letters
/// in `prefix`, and `visited` marks the cells it occupies.
pub struct Solutions<'s> {
    solver: &'s Solver,
    next_start: usize,
    stack: Vec<Frame>,
    visited: Vec<bool>,
    prefix: String,
    seen: HashSet<String>,
}

impl Solutions<'_> {
    fn enter(&mut self, cell: usize) {
        self.visited[cell] = true;
        self.stack.push(Frame {
            cell,
            next_direction: 0,
        });
    }

    fn leave(&mut self) {
        if let Some(frame) = self.stack.pop() {
            self.visited[frame.cell] = false;
            self.prefix.pop();
        }
    }

    fn found(&mut self) -> Option<FoundWord> {
        if !self.solver.words.contains(self.prefix.as_str()) || self.seen.contains(&self.prefix) {
            return None;
        }
        self.seen.insert(self.prefix.clone());
        Some(FoundWord {
            word: self.prefix.clone(),
            path: self
                .stack
                .iter()
                .map(|frame| self.solver.coordinates(frame.cell))
                .collect(),
        })
    }
}

impl Iterator for Solutions<'_> {
    type Item = FoundWord;

    fn next(&mut self) -> Option<FoundWord> {
        loop {
            let Some(frame) = self.stack.last_mut() else {
                let start = self.next_start;
                if start >= self.solver.cells.len() {
                    return None;
                }
                self.next_start += 1;
                self.prefix.push(self.solver.cells[start]);
                self.enter(start);
                if let Some(found) = self.found() {
                    return Some(found);
                }
                continue;
            };

            if frame.next_direction == NEIGHBOURS.len() {
                self.leave();
                continue;
            }
            let cell = frame.cell;
            let direction = frame.next_direction;
            frame.next_direction += 1;

            let Some(next) = self.solver.neighbour(cell, direction) else {
                continue;
            };
            if self.visited[next] {
                continue;
            }
            self.prefix.push(self.solver.cells[next]);
            if !self.solver.prefixes.contains(self.prefix.as_str()) {
                self.prefix.pop();
                continue;
            }
            self.enter(next);
            if let Some(found) = self.found() {
                return Some(found);
            }
        }
    }
}

/// Solve a single board for presentation: words with their paths, sorted,
/// at most `cap` of them.
pub fn lookup(
    grid: &Grid,
    min_word_length: usize,
    dictionary: &Dictionary,
    cap: usize,
) -> Vec<FoundWord> {
    let solver = Solver::new(grid, min_word_length, dictionary);
    let mut found: Vec<FoundWord> = solver.solve().collect();
    found.sort();
    found.truncate(cap);
    found
}
