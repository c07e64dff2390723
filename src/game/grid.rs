use super::action::Direction;

/// Identifier of a grid cell, `1..=rows * cols` in row-major order
pub type CellId = u32;

/// A (row, col) position. Signed so that a step off the board is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coords {
    pub row: i32,
    pub col: i32,
}

impl Coords {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (drow, dcol) = direction.delta();
        self.moved_by(drow, dcol)
    }
}

/// Fixed-size board mapping coordinates to cell ids and back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_out_of_bounds(&self, coords: Coords) -> bool {
        coords.row < 0
            || coords.col < 0
            || coords.row as usize >= self.rows
            || coords.col as usize >= self.cols
    }

    /// Row-major id starting at 1. Callers check `is_out_of_bounds` first.
    pub fn cell_id_of(&self, coords: Coords) -> CellId {
        debug_assert!(!self.is_out_of_bounds(coords));
        (coords.row as usize * self.cols + coords.col as usize + 1) as CellId
    }

    /// Inverse of `cell_id_of`
    pub fn coords_of(&self, cell: CellId) -> Option<Coords> {
        let index = (cell as usize).checked_sub(1)?;
        if index >= self.cell_count() {
            return None;
        }
        Some(Coords::new(
            (index / self.cols) as i32,
            (index % self.cols) as i32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Coords::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Coords::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Coords::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Coords::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Right), Coords::new(5, 6));
    }

    #[test]
    fn test_row_major_ids() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.cell_id_of(Coords::new(0, 0)), 1);
        assert_eq!(grid.cell_id_of(Coords::new(0, 9)), 10);
        assert_eq!(grid.cell_id_of(Coords::new(1, 0)), 11);
        assert_eq!(grid.cell_id_of(Coords::new(4, 3)), 44);
        assert_eq!(grid.cell_id_of(Coords::new(9, 9)), 100);
    }

    #[test]
    fn test_cell_ids_are_a_bijection() {
        let grid = Grid::new(4, 7);
        let mut seen = std::collections::HashSet::new();
        for row in 0..4 {
            for col in 0..7 {
                let coords = Coords::new(row, col);
                let id = grid.cell_id_of(coords);
                assert!(seen.insert(id));
                assert_eq!(grid.coords_of(id), Some(coords));
            }
        }
        assert_eq!(seen.len(), grid.cell_count());
        assert_eq!(grid.coords_of(0), None);
        assert_eq!(grid.coords_of(29), None);
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 15);

        assert!(!grid.is_out_of_bounds(Coords::new(0, 0)));
        assert!(!grid.is_out_of_bounds(Coords::new(19, 14)));
        assert!(grid.is_out_of_bounds(Coords::new(-1, 0)));
        assert!(grid.is_out_of_bounds(Coords::new(0, -1)));
        assert!(grid.is_out_of_bounds(Coords::new(20, 0)));
        assert!(grid.is_out_of_bounds(Coords::new(0, 15)));
    }
}
