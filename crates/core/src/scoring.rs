//! Scoring module - line-clear points and the gravity speed curve
//!
//! Points are awarded per lock: 100 per cleared row, plus a 600 point bonus
//! when exactly four rows clear together (when the rule is enabled).
//! The gravity interval only shapes how often the scheduler calls `tick()`;
//! the engine itself never reads the clock.

use crate::types::{
    GRAVITY_BASE_MS, GRAVITY_FLOOR_MS, GRAVITY_SCORE_STEP, GRAVITY_STEP_MS, LINE_CLEAR_POINTS,
    TETRIS_BONUS, TETRIS_LINES,
};

/// Scoring options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRules {
    /// Award `TETRIS_BONUS` on top of the per-row points for a four-row clear.
    pub tetris_bonus: bool,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self { tetris_bonus: true }
    }
}

/// Points for clearing `lines` rows in a single lock
pub fn line_clear_points(lines: usize, rules: ScoringRules) -> u32 {
    let base = (lines as u32).saturating_mul(LINE_CLEAR_POINTS);
    if rules.tetris_bonus && lines == TETRIS_LINES {
        base + TETRIS_BONUS
    } else {
        base
    }
}

/// Gravity interval (ms) for the current score.
///
/// Starts at 600ms and speeds up by 50ms every 300 points, floored at 150ms.
pub fn gravity_interval_ms(score: u32) -> u32 {
    let steps = score / GRAVITY_SCORE_STEP;
    GRAVITY_BASE_MS
        .saturating_sub(steps.saturating_mul(GRAVITY_STEP_MS))
        .max(GRAVITY_FLOOR_MS)
}
