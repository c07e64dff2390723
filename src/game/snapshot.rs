use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::CellId;

/// How a presentation layer should paint a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellClass {
    Plain,
    Snake,
    Food,
    FoodReversing,
}

/// Owned, read-only view of a game, enough to draw the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    /// Sorted ascending
    pub occupied: Vec<CellId>,
    pub head: CellId,
    pub food: CellId,
    pub food_reverses_direction: bool,
    pub score: u32,
    pub length: usize,
    pub direction: Direction,
}

impl Snapshot {
    pub fn cell_class(&self, cell: CellId) -> CellClass {
        if self.occupied.binary_search(&cell).is_ok() {
            CellClass::Snake
        } else if cell == self.food && self.food_reverses_direction {
            CellClass::FoodReversing
        } else if cell == self.food {
            CellClass::Food
        } else {
            CellClass::Plain
        }
    }

    /// Cell ids of one board row, left to right
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = CellId> {
        let first = (row * self.cols + 1) as CellId;
        first..first + self.cols as CellId
    }
}
