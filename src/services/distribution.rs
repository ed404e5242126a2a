use std::cmp::Ordering;
use log::{debug, info};
use crate::config::BoardSpec;
use crate::error::{LantError, Result};
use crate::models::{BoardComposition, FrequencyTable};

/// Compute how many dice faces each letter gets on a board.
///
/// Counts are rounded down from the frequency first; the faces still missing
/// are then handed out one at a time starting from the least frequent letter.
/// When more faces are missing than there are letters, further passes are
/// made in the same order, so the total always equals `spec.dice_faces()`.
pub fn compose_board(freq: &FrequencyTable, spec: &BoardSpec) -> Result<BoardComposition> {
    if freq.is_empty() {
        return Err(LantError::NoPlayableCharacters);
    }
    let total = spec.dice_faces();

    // Stable sort, ties keep table order
    let mut ordered: Vec<(char, f64)> = freq.entries().to_vec();
    ordered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let mut counts: Vec<(char, usize)> = ordered
        .iter()
        .map(|&(c, f)| (c, (f * total as f64).floor() as usize))
        .collect();
    let rounded_down: usize = counts.iter().map(|(_, n)| n).sum();

    if rounded_down <= total {
        let mut missing = total - rounded_down;
        info!("After distributing according to frequency I'm missing: {}", missing);
        while missing > 0 {
            for (_, n) in counts.iter_mut().rev() {
                if missing == 0 {
                    break;
                }
                *n += 1;
                missing -= 1;
            }
        }
    } else {
        // Only reachable when the frequencies add up to more than 1
        let mut surplus = rounded_down - total;
        debug!("Rounded counts overshoot by {}", surplus);
        while surplus > 0 {
            for (_, n) in counts.iter_mut() {
                if surplus == 0 {
                    break;
                }
                if *n > 0 {
                    *n -= 1;
                    surplus -= 1;
                }
            }
        }
    }

    for (&(c, n), &(_, f)) in counts.iter().zip(ordered.iter()) {
        info!(
            "{} {:05.2} {:>3} {}",
            c,
            f * 100.0,
            n,
            std::iter::repeat(c).take(n).collect::<String>()
        );
    }
    let composition = BoardComposition::new(counts);
    info!("{} letters in total", composition.total());
    Ok(composition)
}
