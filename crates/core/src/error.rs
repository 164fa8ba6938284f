//! Error types for direct board access.
//!
//! The engine's public operations are total; the only failure is an
//! out-of-grid query made against a [`Board`](crate::Board) directly.

use thiserror::Error;

use crate::types::{BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("cell ({row}, {col}) is outside the {}x{} board", BOARD_ROWS, BOARD_COLS)]
    OutOfRange { row: i8, col: i8 },
}

pub type CoreResult<T> = Result<T, CoreError>;
