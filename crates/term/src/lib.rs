//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders into a simple framebuffer that is
//! diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Precise control over aspect ratio (2 chars wide per board cell)
//! - Skins are drawn with their own color and glyph

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use haunted_blocks_core as core;
pub use haunted_blocks_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{skin_glyph, AnchorY, GameView, LeaderboardPanel, PanelRow, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
