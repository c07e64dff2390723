//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A host drives it with one `advance` call per tick and reads back a `Snapshot`.

pub mod action;
pub mod body;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use body::{Segment, SnakeBody};
pub use config::GameConfig;
pub use engine::{GameEngine, Outcome, TickResult};
pub use grid::{CellId, Coords, Grid};
pub use snapshot::{CellClass, Snapshot};
pub use state::{GameOverCause, GameState};
