//! RNG module - independent uniform piece draws
//!
//! Every draw picks one of the 7 shapes uniformly, then one of the 4 skins
//! uniformly. Draws never depend on earlier draws (no bag).
//!
//! The randomness comes from an injectable [`RandomSource`], so tests and
//! replays can script the exact sequence of pieces.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pieces::Piece;
use crate::types::{ShapeKind, Skin};

/// Uniform index source.
pub trait RandomSource {
    /// Return a value in `[0, bound)`. `bound` is always non-zero.
    fn pick(&mut self, bound: usize) -> usize;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Default source used by the game.
pub type DefaultSource = RngSource<StdRng>;

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Values are reduced modulo the requested bound. An empty script always
/// yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Script that always produces the same shape and skin.
    pub fn repeating(kind: ShapeKind, skin: Skin) -> Self {
        Self::new(vec![shape_index(kind), skin_index(skin)])
    }

    /// Script producing the given (shape, skin) pairs in order, then cycling.
    pub fn pieces(pieces: &[(ShapeKind, Skin)]) -> Self {
        let values: Vec<usize> = pieces
            .iter()
            .flat_map(|&(kind, skin)| [shape_index(kind), skin_index(skin)])
            .collect();
        Self::new(values)
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v % bound
    }
}

fn shape_index(kind: ShapeKind) -> usize {
    ShapeKind::ALL
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default()
}

fn skin_index(skin: Skin) -> usize {
    Skin::ALL.iter().position(|&s| s == skin).unwrap_or_default()
}

/// Piece generator: an unbounded stream of freshly spawned pieces.
#[derive(Debug, Clone)]
pub struct PieceGenerator<S> {
    source: S,
}

impl<S: RandomSource> PieceGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Draw the next piece at its spawn anchor
    pub fn draw(&mut self) -> Piece {
        let kind = ShapeKind::ALL[self.source.pick(ShapeKind::ALL.len())];
        let skin = Skin::ALL[self.source.pick(Skin::ALL.len())];
        Piece::spawn(kind, skin)
    }
}

impl<S: RandomSource> Iterator for PieceGenerator<S> {
    type Item = Piece;

    fn next(&mut self) -> Option<Piece> {
        Some(self.draw())
    }
}

impl Default for PieceGenerator<DefaultSource> {
    fn default() -> Self {
        Self::new(RngSource::from_entropy())
    }
}
