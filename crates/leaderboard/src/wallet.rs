//! Wallet addresses and the score verification seam.
//!
//! Addresses are `0x` followed by 40 hex digits. They are stored lowercased
//! so that checksummed and plain spellings of one wallet share a single
//! leaderboard entry.

use std::fmt;

use crate::error::{LeaderboardError, LeaderboardResult};

const HEX_DIGITS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(raw: &str) -> LeaderboardResult<Self> {
        let trimmed = raw.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| LeaderboardError::InvalidWallet(raw.to_string()))?;

        if hex.len() != HEX_DIGITS || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(LeaderboardError::InvalidWallet(raw.to_string()));
        }
        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0x1234...abcd`, for narrow displays.
    pub fn short(&self) -> String {
        short_label(&self.0)
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorten any address-like string to its first 6 and last 4 chars.
pub fn short_label(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 13 {
        return addr.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Decides whether a submitted score is genuine before it is stored.
///
/// Deployments that attest scores elsewhere (e.g. on chain) plug in here.
pub trait ScoreVerifier: Send + Sync {
    fn verify(&self, wallet: &WalletAddress, score: u32) -> bool;
}

/// Trusts every submission.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ScoreVerifier for AcceptAll {
    fn verify(&self, _wallet: &WalletAddress, _score: u32) -> bool {
        true
    }
}

impl<F> ScoreVerifier for F
where
    F: Fn(&WalletAddress, u32) -> bool + Send + Sync,
{
    fn verify(&self, wallet: &WalletAddress, score: u32) -> bool {
        self(wallet, score)
    }
}
