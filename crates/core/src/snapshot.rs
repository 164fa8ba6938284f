//! Read-only view of a session for renderers and observers.
//!
//! The board is flattened into skin codes (0 = empty, see [`Skin::as_u8`]) so
//! the snapshot is `Copy` and can be refilled every frame without allocating.
//!
//! [`Skin::as_u8`]: crate::types::Skin::as_u8

use crate::pieces::Piece;
use crate::types::{RunState, BOARD_COLS, BOARD_ROWS};

pub type BoardGrid = [[u8; BOARD_COLS as usize]; BOARD_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<Piece>,
    pub next: Option<Piece>,
    pub run_state: RunState,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub session_id: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            next: None,
            run_state: RunState::Idle,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            session_id: 0,
        }
    }
}

impl GameSnapshot {
    /// Skin code at (row, col) including the active piece overlay.
    pub fn cell_with_active(&self, row: i8, col: i8) -> u8 {
        if let Some(active) = self.active {
            if active.cells().any(|(r, c)| r == row && c == col) {
                return active.skin.as_u8();
            }
        }
        if row < 0 || col < 0 || row >= BOARD_ROWS as i8 || col >= BOARD_COLS as i8 {
            return 0;
        }
        self.board[row as usize][col as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, Skin};

    #[test]
    fn test_cell_with_active_overlays_piece() {
        let mut snap = GameSnapshot::default();
        snap.board[19][0] = Skin::Bat.as_u8();
        snap.active = Some(Piece::spawn(ShapeKind::O, Skin::Ghost));

        assert_eq!(snap.cell_with_active(0, 4), Skin::Ghost.as_u8());
        assert_eq!(snap.cell_with_active(1, 5), Skin::Ghost.as_u8());
        assert_eq!(snap.cell_with_active(19, 0), Skin::Bat.as_u8());
        assert_eq!(snap.cell_with_active(10, 0), 0);
        assert_eq!(snap.cell_with_active(-1, 0), 0);
    }
}
