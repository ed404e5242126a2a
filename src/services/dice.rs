use rand::seq::SliceRandom;
use rand::Rng;
use crate::error::{LantError, Result};
use crate::models::{Die, Grid, FACES};

/// Randomize the order of letters in a board string, leaving the input untouched.
pub fn scramble<R: Rng + ?Sized>(letters: &[char], rng: &mut R) -> Vec<char> {
    let mut scrambled = letters.to_vec();
    scrambled.shuffle(rng);
    scrambled
}

/// Split a board string into consecutive dice of six faces each.
pub fn group_into_dice(letters: &[char]) -> Result<Vec<Die>> {
    if letters.len() % FACES != 0 {
        return Err(LantError::InvalidParameter(format!(
            "{} letters cannot be split into dice of {}",
            letters.len(),
            FACES
        )));
    }
    Ok(letters
        .chunks_exact(FACES)
        .map(|chunk| {
            let mut faces = [' '; FACES];
            faces.copy_from_slice(chunk);
            Die(faces)
        })
        .collect())
}

/// Shake the box: every die lands on a new, uniformly random position.
pub fn shake<R: Rng + ?Sized>(dice: &mut [Die], rng: &mut R) {
    dice.shuffle(rng);
}

/// Pick the player facing letter of each die, in die order.
pub fn roll<R: Rng + ?Sized>(dice: &[Die], rng: &mut R) -> Vec<char> {
    dice.iter()
        .map(|die| die.faces()[rng.gen_range(0..FACES)])
        .collect()
}

/// Lay the rolled letters out on a square board, row by row.
pub fn lay_out(faces: Vec<char>, board_size: usize) -> Result<Grid> {
    Grid::square(faces, board_size)
}
