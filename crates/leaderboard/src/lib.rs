//! Leaderboard module - best score per wallet, served over TCP
//!
//! Finished sessions are submitted with the player's wallet address; the
//! server keeps the best score per wallet and serves the top of the table.
//! The engine never talks to the leaderboard; the game binary does, after a
//! session ends.
//!
//! # Protocol Overview
//!
//! A **line-delimited JSON protocol** over TCP (default: 127.0.0.1:7878).
//! Each request line gets exactly one response line:
//!
//! ```text
//! Client -> Server: {"type":"submit","wallet_address":"0x...","score":1200}
//! Server -> Client: {"type":"ok","message":"score saved","updated":true}
//! Client -> Server: {"type":"leaderboard","limit":10}
//! Server -> Client: {"type":"leaderboard","entries":[{"wallet_address":"0x...","score":1200}]}
//! Client -> Server: {"type":"reset","wallet_address":"0x..."}
//! Server -> Client: {"type":"error","code":"forbidden","message":"..."}
//! ```
//!
//! # Environment Variables
//!
//! - `HAUNTED_LEADERBOARD_HOST`: bind/connect address (default: "127.0.0.1")
//! - `HAUNTED_LEADERBOARD_PORT`: port (default: 7878)
//! - `HAUNTED_LEADERBOARD_PATH`: JSON file backing the server (default: "leaderboard.json")
//! - `HAUNTED_ADMIN_WALLET`: the only wallet allowed to reset
//! - `HAUNTED_WALLET`: player wallet used by the game for submissions
//! - `HAUNTED_LEADERBOARD_DISABLED`: "1"/"true" stops the game from submitting
//!
//! # Testing
//!
//! ```bash
//! nc 127.0.0.1 7878
//! {"type":"leaderboard","limit":10}
//! ```

pub mod client;
pub mod error;
pub mod protocol;
pub mod server;
pub mod service;
pub mod store;
pub mod wallet;

pub use haunted_blocks_types as types;

pub use client::{ClientConfig, LeaderboardClient};
pub use error::{LeaderboardError, LeaderboardResult, RemoteError};
pub use protocol::{parse_request, ErrorCode, Request, Response};
pub use server::{handle_request, run_server, ServerConfig};
pub use service::Leaderboard;
pub use store::{JsonFileStore, LeaderboardEntry, MemoryStore, ScoreStore};
pub use wallet::{short_label, AcceptAll, ScoreVerifier, WalletAddress};
