//! Pieces module - shape catalog, piece values and naive rotation
//!
//! Shapes are small boolean matrices (at most 4x4). A piece pairs a shape
//! with a skin and a board anchor: `(row, col)` is where the shape's top-left
//! cell sits on the board. Pieces are `Copy` values; moving or rotating
//! returns a new piece.
//!
//! Rotation is clockwise around the shape's own bounding box (transpose,
//! then reverse each row). The anchor does not move and there are no kicks.

use crate::types::{ShapeKind, Skin, BOARD_COLS};

/// Largest shape dimension in the catalog.
pub const MAX_SHAPE_DIM: usize = 4;

/// Boolean shape matrix with explicit dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

const fn matrix<const R: usize, const C: usize>(m: [[u8; C]; R]) -> Shape {
    let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    let mut r = 0;
    while r < R {
        let mut c = 0;
        while c < C {
            cells[r][c] = m[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape {
        rows: R as u8,
        cols: C as u8,
        cells,
    }
}

const I_SHAPE: Shape = matrix([[1, 1, 1, 1]]);
const O_SHAPE: Shape = matrix([[1, 1], [1, 1]]);
const T_SHAPE: Shape = matrix([[0, 1, 0], [1, 1, 1]]);
const L_SHAPE: Shape = matrix([[1, 0], [1, 0], [1, 1]]);
const J_SHAPE: Shape = matrix([[0, 1], [0, 1], [1, 1]]);
const S_SHAPE: Shape = matrix([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Shape = matrix([[1, 1, 0], [0, 1, 1]]);

/// Get the spawn-orientation shape for a catalog entry
pub fn get_shape(kind: ShapeKind) -> Shape {
    match kind {
        ShapeKind::I => I_SHAPE,
        ShapeKind::O => O_SHAPE,
        ShapeKind::T => T_SHAPE,
        ShapeKind::L => L_SHAPE,
        ShapeKind::J => J_SHAPE,
        ShapeKind::S => S_SHAPE,
        ShapeKind::Z => Z_SHAPE,
    }
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` for empty, ragged, or larger-than-4x4 input.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if height > MAX_SHAPE_DIM || width == 0 || width > MAX_SHAPE_DIM {
            return None;
        }
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the cell at (row, col) of the matrix is filled.
    /// Out-of-matrix positions read as empty.
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.cells[row as usize][col as usize]
    }

    /// Offsets (row, col) of filled cells, row-major.
    pub fn filled(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.cells[r as usize][c as usize])
                .map(move |c| (r, c))
        })
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let h = self.rows as usize;
        let w = self.cols as usize;
        for (r, row) in cells.iter_mut().enumerate().take(w) {
            for (c, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - c][r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Render as rows of `#`/`.` (handy in assertion messages).
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| if self.is_filled(r, c) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

/// Spawn column for a shape of the given width: centered, ties to the left.
pub fn spawn_col(width: u8) -> i8 {
    (BOARD_COLS / 2) as i8 - (width / 2) as i8
}

/// A falling (or queued) piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub skin: Skin,
    pub row: i8,
    pub col: i8,
}

impl Piece {
    /// Create a piece in spawn orientation at the spawn anchor
    pub fn spawn(kind: ShapeKind, skin: Skin) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            skin,
            row: 0,
            col: spawn_col(shape.cols()),
        }
    }

    /// Same piece at an explicit anchor.
    pub fn at(self, row: i8, col: i8) -> Self {
        Self { row, col, ..self }
    }

    pub fn translated(&self, drow: i8, dcol: i8) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
            ..*self
        }
    }

    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Absolute board positions (row, col) of the filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled()
            .map(move |(r, c)| (self.row + r as i8, self.col + c as i8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_dimensions() {
        let dims: Vec<(u8, u8)> = ShapeKind::ALL
            .iter()
            .map(|&k| (get_shape(k).rows(), get_shape(k).cols()))
            .collect();
        assert_eq!(
            dims,
            vec![(1, 4), (2, 2), (2, 3), (3, 2), (3, 2), (2, 3), (2, 3)]
        );
    }

    #[test]
    fn test_every_catalog_shape_has_four_cells() {
        for kind in ShapeKind::ALL {
            assert_eq!(get_shape(kind).filled().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotate_l_clockwise() {
        let rotated = get_shape(ShapeKind::L).rotated_cw();
        assert_eq!(rotated.to_rows(), vec!["###", "#.."]);
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = get_shape(ShapeKind::T).rotated_cw();
        assert_eq!(rotated.to_rows(), vec!["#.", "##", "#."]);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in ShapeKind::ALL {
            let shape = get_shape(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_spawn_is_centered() {
        assert_eq!(Piece::spawn(ShapeKind::I, Skin::Bat).col, 3);
        assert_eq!(Piece::spawn(ShapeKind::O, Skin::Bat).col, 4);
        assert_eq!(Piece::spawn(ShapeKind::T, Skin::Bat).col, 4);
        assert_eq!(Piece::spawn(ShapeKind::L, Skin::Bat).col, 4);
        assert_eq!(Piece::spawn(ShapeKind::O, Skin::Bat).row, 0);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Shape::from_rows(&[]).is_none());
        assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
        assert!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
        assert_eq!(
            Shape::from_rows(&[&[0, 1], &[1, 1]]).map(|s| s.to_rows()),
            Some(vec![".#".to_string(), "##".to_string()])
        );
    }

    #[test]
    fn test_piece_cells_are_absolute() {
        let piece = Piece::spawn(ShapeKind::O, Skin::Ghost).at(5, 2);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, 2), (5, 3), (6, 2), (6, 3)]);
    }

    #[test]
    fn test_translate_and_rotate_do_not_mutate() {
        let piece = Piece::spawn(ShapeKind::S, Skin::Skull);
        let moved = piece.translated(1, -1);
        let turned = piece.rotated();
        assert_eq!(piece, Piece::spawn(ShapeKind::S, Skin::Skull));
        assert_eq!((moved.row, moved.col), (1, piece.col - 1));
        assert_eq!((turned.row, turned.col), (piece.row, piece.col));
        assert_eq!(turned.shape.rows(), 3);
    }
}
