use anyhow::{bail, Result};
use std::collections::HashSet;

use super::action::Direction;
use super::body::{Segment, SnakeBody};
use super::grid::{CellId, Coords, Grid};
use super::snapshot::Snapshot;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// No free cell left for the next food
    BoardFilled,
}

/// Complete game state.
///
/// `occupied` always holds exactly the cell ids in `body`.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) grid: Grid,
    pub(super) body: SnakeBody,
    pub(super) occupied: HashSet<CellId>,
    pub(super) direction: Direction,
    pub(super) food: CellId,
    pub(super) food_reverses_direction: bool,
    pub(super) score: u32,
    pub(super) steps: u32,
}

impl GameState {
    /// Single-segment snake at `start`
    pub fn new(grid: Grid, start: Coords, direction: Direction, food: CellId) -> Result<Self> {
        Self::from_segments(grid, &[start], direction, food)
    }

    /// Build a state from segment coordinates ordered tail to head.
    pub fn from_segments(
        grid: Grid,
        tail_to_head: &[Coords],
        direction: Direction,
        food: CellId,
    ) -> Result<Self> {
        if tail_to_head.is_empty() {
            bail!("a snake needs at least one segment");
        }
        if grid.coords_of(food).is_none() {
            bail!("food cell {food} is not on a {}x{} board", grid.rows(), grid.cols());
        }

        let mut body: Option<SnakeBody> = None;
        let mut occupied = HashSet::new();
        for (index, &coords) in tail_to_head.iter().enumerate() {
            if grid.is_out_of_bounds(coords) {
                bail!("segment ({}, {}) is off the board", coords.row, coords.col);
            }
            if index > 0 && Direction::between(tail_to_head[index - 1], coords).is_none() {
                let previous = tail_to_head[index - 1];
                bail!(
                    "segments ({}, {}) and ({}, {}) are not adjacent",
                    previous.row,
                    previous.col,
                    coords.row,
                    coords.col
                );
            }
            let cell = grid.cell_id_of(coords);
            if !occupied.insert(cell) {
                bail!("cell {cell} appears twice in the snake");
            }
            let segment = Segment::new(coords, cell);
            match body.as_mut() {
                None => body = Some(SnakeBody::new(segment)),
                Some(body) => body.push_head(segment),
            }
        }
        if occupied.contains(&food) {
            bail!("food cell {food} is under the snake");
        }

        let Some(body) = body else {
            bail!("a snake needs at least one segment");
        };
        Ok(Self {
            grid,
            body,
            occupied,
            direction,
            food,
            food_reverses_direction: false,
            score: 0,
            steps: 0,
        })
    }

    /// Mark the current food as reversing or not
    pub fn with_reversing_food(mut self, reverses: bool) -> Self {
        self.food_reverses_direction = reverses;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub fn occupied(&self) -> &HashSet<CellId> {
        &self.occupied
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> CellId {
        self.food
    }

    pub fn food_reverses_direction(&self) -> bool {
        self.food_reverses_direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Segment {
        self.body.head()
    }

    pub fn is_occupied(&self, cell: CellId) -> bool {
        self.occupied.contains(&cell)
    }

    /// Direction from the tail toward the segment in front of it.
    /// A single-segment snake uses its travel direction.
    pub fn tail_direction(&self) -> Direction {
        let tail = self.body.tail();
        self.body
            .tail_successor()
            .and_then(|next| Direction::between(tail.coords, next.coords))
            .unwrap_or(self.direction)
    }

    /// Check a requested turn against the live body. Turning straight back
    /// onto the segment behind the head is refused.
    pub fn accept_direction(&self, direction: Direction) -> Option<Direction> {
        if let Some(neck) = self.body.neck() {
            if self.head().coords.moved_in_direction(direction) == neck.coords {
                return None;
            }
        }
        Some(direction)
    }

    /// Key name to an accepted direction, e.g. `"ArrowUp"`
    pub fn request_direction(&self, key: &str) -> Option<Direction> {
        Direction::from_key(key).and_then(|direction| self.accept_direction(direction))
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        let mut occupied: Vec<CellId> = self.occupied.iter().copied().collect();
        occupied.sort_unstable();
        Snapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            occupied,
            head: self.body.head().cell,
            food: self.food,
            food_reverses_direction: self.food_reverses_direction,
            score: self.score,
            length: self.body.len(),
            direction: self.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_snake() -> GameState {
        GameState::from_segments(
            Grid::new(10, 10),
            &[Coords::new(4, 1), Coords::new(4, 2), Coords::new(4, 3)],
            Direction::Right,
            50,
        )
        .unwrap()
    }

    #[test]
    fn test_from_segments() {
        let state = straight_snake();
        assert_eq!(state.len(), 3);
        assert_eq!(state.head().cell, 44);
        assert_eq!(state.body().tail().cell, 42);
        let expected: HashSet<CellId> = [42, 43, 44].into_iter().collect();
        assert_eq!(state.occupied(), &expected);
        assert_eq!(state.score(), 0);
        assert!(!state.food_reverses_direction());
    }

    #[test]
    fn test_from_segments_rejects_bad_layouts() {
        let grid = Grid::new(10, 10);
        assert!(GameState::from_segments(grid, &[], Direction::Right, 5).is_err());
        assert!(GameState::from_segments(grid, &[Coords::new(-1, 0)], Direction::Right, 5).is_err());
        assert!(GameState::from_segments(
            grid,
            &[Coords::new(0, 0), Coords::new(0, 2)],
            Direction::Right,
            5
        )
        .is_err());
        assert!(GameState::from_segments(
            grid,
            &[Coords::new(0, 0), Coords::new(0, 1), Coords::new(0, 0)],
            Direction::Right,
            5
        )
        .is_err());
        assert!(GameState::new(grid, Coords::new(0, 4), Direction::Right, 5).is_err());
        assert!(GameState::new(grid, Coords::new(0, 0), Direction::Right, 101).is_err());
    }

    #[test]
    fn test_tail_direction() {
        let state = straight_snake();
        assert_eq!(state.tail_direction(), Direction::Right);

        let single = GameState::new(Grid::new(5, 5), Coords::new(2, 2), Direction::Up, 1).unwrap();
        assert_eq!(single.tail_direction(), Direction::Up);

        let bent = GameState::from_segments(
            Grid::new(10, 10),
            &[Coords::new(6, 3), Coords::new(5, 3), Coords::new(5, 4)],
            Direction::Right,
            1,
        )
        .unwrap();
        assert_eq!(bent.tail_direction(), Direction::Up);
    }

    #[test]
    fn test_accept_direction_refuses_turning_into_neck() {
        let state = straight_snake();
        assert_eq!(state.accept_direction(Direction::Left), None);
        assert_eq!(state.accept_direction(Direction::Up), Some(Direction::Up));
        assert_eq!(state.accept_direction(Direction::Down), Some(Direction::Down));
        assert_eq!(state.accept_direction(Direction::Right), Some(Direction::Right));
    }

    #[test]
    fn test_single_segment_may_turn_anywhere() {
        let state = GameState::new(Grid::new(5, 5), Coords::new(2, 2), Direction::Right, 1).unwrap();
        for direction in Direction::ALL {
            assert_eq!(state.accept_direction(direction), Some(direction));
        }
    }

    #[test]
    fn test_request_direction_by_key() {
        let state = straight_snake();
        assert_eq!(state.request_direction("ArrowUp"), Some(Direction::Up));
        assert_eq!(state.request_direction("ArrowLeft"), None);
        assert_eq!(state.request_direction("Space"), None);
    }

    #[test]
    fn test_snapshot() {
        let state = straight_snake().with_reversing_food(true);
        let snapshot = state.snapshot();
        assert_eq!(snapshot.rows, 10);
        assert_eq!(snapshot.cols, 10);
        assert_eq!(snapshot.occupied, vec![42, 43, 44]);
        assert_eq!(snapshot.head, 44);
        assert_eq!(snapshot.food, 50);
        assert!(snapshot.food_reverses_direction);
        assert_eq!(snapshot.length, 3);
        assert_eq!(snapshot.direction, Direction::Right);
    }
}
