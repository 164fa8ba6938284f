//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, leaderboard glue).
//!
//! # Board Dimensions
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Spawn row**: 0, horizontally centered per shape
//!
//! # Scoring
//!
//! | Cleared rows | Points |
//! |--------------|--------|
//! | 1 | 100 |
//! | 2 | 200 |
//! | 3 | 300 |
//! | 4 | 1000 (400 + 600 tetris bonus) |
//!
//! # Gravity
//!
//! The scheduler drops the active piece every `GRAVITY_BASE_MS`, shortened by
//! `GRAVITY_STEP_MS` for every `GRAVITY_SCORE_STEP` points, never faster than
//! `GRAVITY_FLOOR_MS`.
//!
//! # Examples
//!
//! ```
//! use haunted_blocks_types::{GameAction, ShapeKind, Skin, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Skin::Ghost.as_str(), "ghost");
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//! assert_eq!((BOARD_ROWS, BOARD_COLS), (20, 10));
//! ```

/// Board height in rows.
pub const BOARD_ROWS: u8 = 20;

/// Board width in columns.
pub const BOARD_COLS: u8 = 10;

/// Points per cleared row.
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Extra points when exactly four rows clear in a single lock.
pub const TETRIS_BONUS: u32 = 600;

/// Rows cleared by a single lock that count as a "tetris".
pub const TETRIS_LINES: usize = 4;

/// Gravity interval at score 0 (milliseconds).
pub const GRAVITY_BASE_MS: u32 = 600;

/// Gravity speed-up per score step (milliseconds).
pub const GRAVITY_STEP_MS: u32 = 50;

/// Score needed for each gravity speed-up.
pub const GRAVITY_SCORE_STEP: u32 = 300;

/// Fastest gravity interval (milliseconds).
pub const GRAVITY_FLOOR_MS: u32 = 150;

/// Fixed input/render frame (milliseconds).
pub const FRAME_MS: u32 = 16;

/// Default number of leaderboard rows shown to players.
pub const LEADERBOARD_SIZE: usize = 10;

/// The seven canonical shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// Catalog order. Random draws index into this array.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Decorative skin of a piece.
///
/// Skins are cosmetic: they tag occupied cells for rendering and have no
/// gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skin {
    Pumpkin,
    Bat,
    Ghost,
    Skull,
}

impl Skin {
    pub const ALL: [Skin; 4] = [Skin::Pumpkin, Skin::Bat, Skin::Ghost, Skin::Skull];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pumpkin" => Some(Skin::Pumpkin),
            "bat" => Some(Skin::Bat),
            "ghost" => Some(Skin::Ghost),
            "skull" => Some(Skin::Skull),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Pumpkin => "pumpkin",
            Skin::Bat => "bat",
            Skin::Ghost => "ghost",
            Skin::Skull => "skull",
        }
    }

    /// Compact grid encoding (0 is reserved for empty cells).
    pub fn as_u8(&self) -> u8 {
        match self {
            Skin::Pumpkin => 1,
            Skin::Bat => 2,
            Skin::Ghost => 3,
            Skin::Skull => 4,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Skin::Pumpkin),
            2 => Some(Skin::Bat),
            3 => Some(Skin::Ghost),
            4 => Some(Skin::Skull),
            _ => None,
        }
    }
}

/// Cell on the board (None = empty, Some = settled block with its skin)
pub type Cell = Option<Skin>;

/// Horizontal move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for this direction.
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// No session has been started.
    #[default]
    Idle,
    Running,
    /// Terminal for the session; only a new start leaves it.
    GameOver,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::GameOver => "gameOver",
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Start,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Start => "start",
        }
    }
}

/// Outcome of a single lock, consumed once by observers (audio/render adapters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub cleared: u32,
    pub points: u32,
    /// Four rows cleared at once.
    pub tetris: bool,
    /// The lock ended the session.
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_kind_roundtrip_strings() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ShapeKind::from_str("X"), None);
    }

    #[test]
    fn test_skin_u8_encoding_reserves_zero() {
        assert_eq!(Skin::from_u8(0), None);
        for skin in Skin::ALL {
            assert_ne!(skin.as_u8(), 0);
            assert_eq!(Skin::from_u8(skin.as_u8()), Some(skin));
        }
    }

    #[test]
    fn test_game_action_parse_is_case_insensitive() {
        assert_eq!(GameAction::from_str("MoveLeft"), Some(GameAction::MoveLeft));
        assert_eq!(GameAction::from_str("softdrop"), Some(GameAction::SoftDrop));
        assert_eq!(GameAction::from_str("hold"), None);
    }

    #[test]
    fn test_run_state_default_is_idle() {
        assert_eq!(RunState::default(), RunState::Idle);
    }
}
