use rand::Rng;
use std::collections::HashSet;

use super::grid::{CellId, Grid};

/// Cell ids ahead of the start cell where the first food goes
pub const INITIAL_FOOD_OFFSET: CellId = 5;

/// Pick a food cell uniformly among cells that are neither occupied nor `current`.
///
/// Rejection sampling over the whole board. Returns `None` only when no such
/// cell exists.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &Grid,
    occupied: &HashSet<CellId>,
    current: Option<CellId>,
) -> Option<CellId> {
    let blocked = occupied.len()
        + current
            .filter(|cell| !occupied.contains(cell))
            .map_or(0, |_| 1);
    if blocked >= grid.cell_count() {
        return None;
    }

    let last = grid.cell_count() as CellId;
    loop {
        let candidate = rng.gen_range(1..=last);
        if !occupied.contains(&candidate) && Some(candidate) != current {
            return Some(candidate);
        }
    }
}

/// Decide whether the next food reverses the snake
pub fn draw_reverses_direction<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

/// Fixed first food placement: a few cells after the start cell, when that is on the board.
pub fn initial_food(grid: &Grid, start: CellId) -> Option<CellId> {
    let cell = start + INITIAL_FOOD_OFFSET;
    (cell as usize <= grid.cell_count()).then_some(cell)
}
