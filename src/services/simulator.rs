use log::{debug, info};
use rand::Rng;
use crate::config::BoardSpec;
use crate::error::{LantError, Result};
use crate::models::{Dictionary, Die, RoundResult};
use crate::services::dice::{group_into_dice, lay_out, roll, scramble, shake};
use crate::services::solver::Solver;
use crate::utils::elapsed;

/// Plays simulated games on dice built from one letter composition.
///
/// A round scrambles the board string once into a dice set, then shakes the
/// box and rolls the dice for every game; its score is the mean number of
/// words a perfect player would find.
pub struct RoundSimulator<'d> {
    spec: BoardSpec,
    min_word_length: usize,
    dictionary: &'d Dictionary,
}

impl<'d> RoundSimulator<'d> {
    pub fn new(spec: BoardSpec, min_word_length: usize, dictionary: &'d Dictionary) -> Self {
        RoundSimulator {
            spec,
            min_word_length,
            dictionary,
        }
    }

    /// Shake, roll and solve once, returning the number of distinct words found.
    pub fn play_game<R: Rng + ?Sized>(&self, dice: &mut [Die], rng: &mut R) -> Result<usize> {
        shake(dice, rng);
        let faces = roll(dice, rng);
        let grid = lay_out(faces, self.spec.board_size)?;
        let solver = Solver::new(&grid, self.min_word_length, self.dictionary);
        let words: Vec<String> = elapsed("solve took", || solver.words().collect());
        debug!("board:\n{}", grid);
        debug!(
            "found ({} of {} candidates): {}",
            words.len(),
            solver.candidate_count(),
            words.join(" ")
        );
        Ok(words.len())
    }

    pub fn play_round<R: Rng + ?Sized>(
        &self,
        board_string: &[char],
        round_size: usize,
        rng: &mut R,
    ) -> Result<RoundResult> {
        if round_size == 0 {
            return Err(LantError::InvalidParameter(
                "a round needs at least one game".to_string(),
            ));
        }
        if board_string.len() != self.spec.dice_faces() {
            return Err(LantError::InvalidParameter(format!(
                "board string has {} letters, the board needs {}",
                board_string.len(),
                self.spec.dice_faces()
            )));
        }

        elapsed("Round took", || -> Result<RoundResult> {
            let scrambled = scramble(board_string, rng);
            debug!("scrambled board string {:?}", scrambled.iter().collect::<String>());
            let mut dice = group_into_dice(&scrambled)?;

            let mut total = 0usize;
            for game_no in 0..round_size {
                debug!("Start game no {}.", game_no);
                total += self.play_game(&mut dice, rng)?;
            }
            Ok(RoundResult {
                average: total as f64 / round_size as f64,
                scrambled,
            })
        })
    }

    /// Play `rounds` rounds, handing each result to `record` before the next
    /// one starts. Stops at the first error `record` returns.
    pub fn run_rounds<R, F>(
        &self,
        board_string: &[char],
        round_size: usize,
        rounds: usize,
        rng: &mut R,
        mut record: F,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
        F: FnMut(&RoundResult) -> Result<()>,
    {
        for round_no in 0..rounds {
            let result = self.play_round(board_string, round_size, rng)?;
            record(&result)?;
            info!("{:.2}: {} (round {}/{})", result.average, result.dice_set(), round_no + 1, rounds);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Alphabet;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec(board_size: usize) -> BoardSpec {
        let alphabet = Alphabet::new("eng", "abcdefghijklmnopqrstuvwxyz").unwrap();
        BoardSpec::new(board_size, &alphabet).unwrap()
    }

    fn english_board_string() -> Vec<char> {
        // 150 faces for a 5x5 board
        "etaoinshrdlucmfwypvbgkjqxz"
            .repeat(6)
            .chars()
            .take(150)
            .collect()
    }

    #[test]
    fn test_single_game_round_equals_game_count() {
        let dictionary = Dictionary::new(["tone", "note", "stone", "rates", "heart", "earth", "dare", "read"]);
        let simulator = RoundSimulator::new(spec(5), 4, &dictionary);
        let board_string = english_board_string();

        let mut rng = StdRng::seed_from_u64(1234);
        let result = simulator.play_round(&board_string, 1, &mut rng).unwrap();

        let mut replay = StdRng::seed_from_u64(1234);
        let scrambled = scramble(&board_string, &mut replay);
        let mut dice = group_into_dice(&scrambled).unwrap();
        let count = simulator.play_game(&mut dice, &mut replay).unwrap();

        assert_eq!(result.scrambled, scrambled);
        assert_eq!(result.average, count as f64);
    }

    #[test]
    fn test_uniform_board_scores_every_game_the_same() {
        let board_string: Vec<char> = std::iter::repeat('a').take(24).collect();
        let dictionary = Dictionary::new(["aaa", "aaaa", "aaaaa", "ab"]);
        let alphabet = Alphabet::new("t", "a").unwrap();
        let spec = BoardSpec::new(2, &alphabet).unwrap();
        let simulator = RoundSimulator::new(spec, 3, &dictionary);
        let mut rng = StdRng::seed_from_u64(5);
        let result = simulator.play_round(&board_string, 20, &mut rng).unwrap();
        assert_eq!(result.average, 2.0);
        assert_eq!(result.dice_set(), "a".repeat(24));
    }

    #[test]
    fn test_scrambled_keeps_letters() {
        let dictionary = Dictionary::new(["tone"]);
        let simulator = RoundSimulator::new(spec(5), 4, &dictionary);
        let board_string = english_board_string();
        let mut rng = StdRng::seed_from_u64(99);
        let result = simulator.play_round(&board_string, 3, &mut rng).unwrap();

        let mut expected = board_string.clone();
        expected.sort_unstable();
        let mut actual = result.scrambled.clone();
        actual.sort_unstable();
        assert_eq!(actual, expected);
        assert!(result.average >= 0.0);
    }

    #[test]
    fn test_rejects_bad_round_parameters() {
        let dictionary = Dictionary::new(["tone"]);
        let simulator = RoundSimulator::new(spec(5), 4, &dictionary);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(simulator.play_round(&english_board_string(), 0, &mut rng).is_err());
        assert!(simulator.play_round(&['a'; 12], 1, &mut rng).is_err());
    }

    #[test]
    fn test_run_rounds_records_each_round() {
        let dictionary = Dictionary::new(["tone"]);
        let simulator = RoundSimulator::new(spec(5), 4, &dictionary);
        let mut rng = StdRng::seed_from_u64(8);
        let mut recorded = Vec::new();
        simulator
            .run_rounds(&english_board_string(), 2, 4, &mut rng, |result| {
                recorded.push(result.dice_set());
                Ok(())
            })
            .unwrap();
        assert_eq!(recorded.len(), 4);
        assert!(recorded.iter().all(|s| s.chars().count() == 150));
    }

    #[test]
    fn test_run_rounds_stops_on_record_failure() {
        let dictionary = Dictionary::new(["tone"]);
        let simulator = RoundSimulator::new(spec(5), 4, &dictionary);
        let mut rng = StdRng::seed_from_u64(8);
        let mut calls = 0;
        let err = simulator
            .run_rounds(&english_board_string(), 1, 10, &mut rng, |_| {
                calls += 1;
                Err(LantError::Storage {
                    path: "results.jsonl".into(),
                    reason: "disk full".to_string(),
                })
            })
            .unwrap_err();
        assert_eq!(calls, 1);
        assert!(matches!(err, LantError::Storage { .. }));
    }
}
