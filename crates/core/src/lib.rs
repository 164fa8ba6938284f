//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of Haunted Blocks: the settled-block grid,
//! the seven shapes, piece generation, scoring and the session state machine.
//! It has no dependencies on the terminal or the network.
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 grid with collision detection and row clearing
//! - [`game_state`]: session state machine (`Idle -> Running -> GameOver`)
//! - [`pieces`]: shape catalog, clockwise rotation, spawn anchors
//! - [`rng`]: independent uniform shape/skin draws behind a pluggable source
//! - [`scoring`]: line-clear points and the gravity speed curve
//! - [`gravity`]: timer the front-end uses to schedule `tick()`
//!
//! # Game Rules
//!
//! - Pieces spawn at row 0, horizontally centered (ties to the left)
//! - Rotation is clockwise about the bounding box origin, with no wall kicks
//! - A piece that cannot move down locks immediately; there is no lock delay
//! - 100 points per cleared row, 1000 for four rows at once
//! - The session ends when the next piece cannot spawn
//!
//! # Example
//!
//! ```
//! use haunted_blocks_core::GameState;
//! use haunted_blocks_types::{GameAction, RunState};
//!
//! let mut game = GameState::with_seed(12345);
//! game.start_game();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.tick();
//!
//! assert_eq!(game.run_state(), RunState::Running);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use haunted_blocks_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{CoreError, CoreResult};
pub use game_state::{collides, GameState, StepOutcome};
pub use gravity::GravityTimer;
pub use pieces::{get_shape, Piece, Shape};
pub use rng::{DefaultSource, PieceGenerator, RandomSource, RngSource, ScriptedSource};
pub use scoring::{gravity_interval_ms, line_clear_points, ScoringRules};
pub use snapshot::{BoardGrid, GameSnapshot};
