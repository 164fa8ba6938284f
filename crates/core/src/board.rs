//! Board module - the settled-block grid
//!
//! The board is a 20x10 grid where each cell is empty or holds the skin of the
//! piece that settled there. Storage is a flat row-major array.
//! Coordinates are (row, col): row 0 is the top, col 0 is the left edge.
//!
//! Boards behave as values. Merging a piece or clearing rows returns a new
//! board and leaves the receiver untouched, so snapshots handed out earlier
//! never change underneath their holders.

use arrayvec::ArrayVec;

use crate::error::{CoreError, CoreResult};
use crate::pieces::Piece;
use crate::types::{Cell, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// Row indices removed by a clear, bottom to top.
pub type ClearedRows = ArrayVec<usize, { BOARD_ROWS as usize }>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_ROWS as i8 || col < 0 || col >= BOARD_COLS as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Get cell at (row, col); `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Occupancy of an in-grid cell.
    pub fn is_occupied(&self, row: i8, col: i8) -> CoreResult<bool> {
        self.get(row, col)
            .map(|cell| cell.is_some())
            .ok_or(CoreError::OutOfRange { row, col })
    }

    /// Copy of this board with one cell replaced.
    pub fn with_cell(&self, row: i8, col: i8, cell: Cell) -> CoreResult<Board> {
        let idx = Self::index(row, col).ok_or(CoreError::OutOfRange { row, col })?;
        let mut next = self.clone();
        next.cells[idx] = cell;
        Ok(next)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_ROWS as usize {
            return false;
        }
        let start = row * BOARD_COLS as usize;
        let end = start + BOARD_COLS as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// True iff the piece overlaps a wall, the floor, or a settled cell.
    ///
    /// Cells above the top edge (negative row) are checked against the walls
    /// and floor but never against occupancy.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(row, col)| {
            if row >= BOARD_ROWS as i8 || col < 0 || col >= BOARD_COLS as i8 {
                return true;
            }
            row >= 0 && matches!(self.get(row, col), Some(Some(_)))
        })
    }

    /// Copy of this board with the piece's skin written into its cells.
    ///
    /// Cells above the visible grid are dropped. The caller is responsible for
    /// having ruled out collisions.
    pub fn with_piece_merged(&self, piece: &Piece) -> Board {
        let mut next = self.clone();
        for (row, col) in piece.cells() {
            if row < 0 {
                continue;
            }
            if let Some(idx) = Self::index(row, col) {
                next.cells[idx] = Some(piece.skin);
            }
        }
        next
    }

    /// Copy of this board with every full row removed and empty rows
    /// inserted at the top, plus the number of rows removed.
    pub fn with_full_rows_cleared(&self) -> (Board, usize) {
        let mut next = self.clone();
        let cleared = next.clear_full_rows();
        (next, cleared.len())
    }

    /// Clear all full rows in place and return the row indices that were
    /// cleared (bottom to top). Two-pointer compaction, no allocation.
    fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_COLS as usize;
        let mut write_row = BOARD_ROWS as usize;

        for read_row in (0..BOARD_ROWS as usize).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src_start = read_row * width;
                    let dst_start = write_row * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_row * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Get a reference to the internal cells array (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write the board into a compact u8 grid (0 = empty, otherwise skin code).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_COLS as usize]; BOARD_ROWS as usize]) {
        let width = BOARD_COLS as usize;
        for (row, out_row) in out.iter_mut().enumerate() {
            let start = row * width;
            for (col, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.cells[start + col].map_or(0, |skin| skin.as_u8());
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
