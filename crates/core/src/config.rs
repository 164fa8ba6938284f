//! Engine configuration.
//!
//! Read from environment variables by the game binary; tests build it directly.

use crate::scoring::ScoringRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub scoring: ScoringRules,
    /// Seed for the piece generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Create from environment variables.
    ///
    /// - `HAUNTED_SEED`: u64 seed for a reproducible piece sequence
    /// - `HAUNTED_TETRIS_BONUS`: `0`/`false` disables the four-row bonus
    pub fn from_env() -> Self {
        use std::env;

        let seed = env::var("HAUNTED_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok());

        let tetris_bonus = env::var("HAUNTED_TETRIS_BONUS")
            .map(|v| parse_flag(&v).unwrap_or(true))
            .unwrap_or(true);

        Self {
            scoring: ScoringRules { tetris_bonus },
            seed,
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
