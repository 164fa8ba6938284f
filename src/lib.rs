//! Haunted Blocks (workspace facade crate).
//!
//! Re-exports the workspace crates under `haunted_blocks::{core,input,leaderboard,term,types}`
//! so binaries, integration tests and benches have one import root.

pub use haunted_blocks_core as core;
pub use haunted_blocks_input as input;
pub use haunted_blocks_leaderboard as leaderboard;
pub use haunted_blocks_term as term;
pub use haunted_blocks_types as types;
