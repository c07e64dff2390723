use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::{
    action::Direction,
    body::{Segment, SnakeBody},
    config::GameConfig,
    food,
    grid::{Coords, Grid},
    state::{GameOverCause, GameState},
};

/// What a tick ended in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    /// The state has already been reset; `final_score` is the score before the reset
    GameOver {
        cause: GameOverCause,
        final_score: u32,
    },
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    pub outcome: Outcome,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether eating actually lengthened the snake
    pub grew: bool,
    /// Whether the snake turned around this tick
    pub reversed: bool,
}

impl TickResult {
    fn moved() -> Self {
        Self {
            outcome: Outcome::Continue,
            ate_food: false,
            grew: false,
            reversed: false,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.outcome, Outcome::GameOver { .. })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh game: one segment a third of the way into the board, heading right
    pub fn new_game(&mut self) -> GameState {
        let grid = Grid::new(self.config.rows, self.config.cols);
        let start = Coords::new(
            (self.config.rows as f64 / 3.0).round() as i32,
            (self.config.cols as f64 / 3.0).round() as i32,
        );
        let start_cell = grid.cell_id_of(start);
        let start_segment = Segment::new(start, start_cell);

        let mut state = GameState {
            grid,
            body: SnakeBody::new(start_segment),
            occupied: [start_cell].into_iter().collect(),
            direction: Direction::Right,
            food: start_cell,
            food_reverses_direction: false,
            score: 0,
            steps: 0,
        };
        // Validated configs always leave at least one free cell
        state.food = food::initial_food(&grid, start_cell)
            .or_else(|| food::place_food(&mut self.rng, &grid, &state.occupied, None))
            .unwrap_or(start_cell);

        debug!(
            start = start_cell,
            food = state.food,
            rows = grid.rows(),
            cols = grid.cols(),
            "new game"
        );
        state
    }

    /// Execute one tick in `direction`.
    ///
    /// On any collision the state is replaced with a fresh game before returning.
    pub fn advance(&mut self, state: &mut GameState, direction: Direction) -> TickResult {
        let next_head = state.head().coords.moved_in_direction(direction);
        if state.grid.is_out_of_bounds(next_head) {
            return self.game_over(state, GameOverCause::Wall);
        }

        let next_cell = state.grid.cell_id_of(next_head);
        if state.occupied.contains(&next_cell) {
            return self.game_over(state, GameOverCause::SelfCollision);
        }

        state.direction = direction;
        state.body.push_head(Segment::new(next_head, next_cell));
        state.occupied.insert(next_cell);
        let old_tail = state.body.pop_tail();
        state.occupied.remove(&old_tail.cell);
        state.steps += 1;

        if next_cell != state.food {
            return TickResult::moved();
        }

        let grew = self.grow(state);
        match self.consume_food(state) {
            Some(reversed) => TickResult {
                outcome: Outcome::Continue,
                ate_food: true,
                grew,
                reversed,
            },
            None => self.game_over(state, GameOverCause::BoardFilled),
        }
    }

    /// Extend the tail backwards, away from the body. Silently does nothing
    /// when that cell is off the board or taken.
    fn grow(&mut self, state: &mut GameState) -> bool {
        let growth_direction = state.tail_direction().opposite();
        let coords = state.body.tail().coords.moved_in_direction(growth_direction);
        if state.grid.is_out_of_bounds(coords) {
            debug!(row = coords.row, col = coords.col, "no room to grow");
            return false;
        }

        let cell = state.grid.cell_id_of(coords);
        if state.occupied.contains(&cell) {
            debug!(cell, "growth cell is taken");
            return false;
        }

        state.body.grow_at_tail(Segment::new(coords, cell));
        state.occupied.insert(cell);
        true
    }

    /// Score the food, place the next one and apply a reversal if the eaten
    /// food called for it. Returns `None` when no cell is left for food.
    fn consume_food(&mut self, state: &mut GameState) -> Option<bool> {
        state.score += 1;
        let next_reverses =
            food::draw_reverses_direction(&mut self.rng, self.config.reversal_probability);
        let next_food =
            food::place_food(&mut self.rng, &state.grid, &state.occupied, Some(state.food))?;

        let reversed = state.food_reverses_direction;
        if reversed {
            Self::reverse(state);
        }

        debug!(
            score = state.score,
            length = state.body.len(),
            next_food,
            next_reverses,
            reversed,
            "food eaten"
        );
        state.food = next_food;
        state.food_reverses_direction = next_reverses;
        Some(reversed)
    }

    /// Turn the snake around: the tail end leads, heading away from the body.
    fn reverse(state: &mut GameState) {
        let new_direction = state.tail_direction().opposite();
        state.body.reverse();
        state.direction = new_direction;
    }

    fn game_over(&mut self, state: &mut GameState, cause: GameOverCause) -> TickResult {
        let final_score = state.score;
        info!(?cause, final_score, steps = state.steps, "game over");
        *state = self.new_game();
        TickResult {
            outcome: Outcome::GameOver { cause, final_score },
            ..TickResult::moved()
        }
    }
}
