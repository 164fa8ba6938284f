//! Score stores: best score per wallet.
//!
//! [`MemoryStore`] keeps scores for the lifetime of the process;
//! [`JsonFileStore`] mirrors every change to a JSON object on disk
//! (`{"0x...": 1200, ...}`, pretty-printed).

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::LeaderboardResult;
use crate::wallet::WalletAddress;

/// One leaderboard row as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub wallet_address: String,
    pub score: u32,
}

pub trait ScoreStore: Send {
    /// Record `score` if it beats the wallet's stored best.
    /// Returns whether the stored best changed.
    fn submit(&mut self, wallet: &WalletAddress, score: u32) -> LeaderboardResult<bool>;

    /// Best scores, highest first, ties by wallet ascending; at most `limit`.
    fn top(&self, limit: usize) -> Vec<LeaderboardEntry>;

    fn reset(&mut self) -> LeaderboardResult<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type ScoreMap = BTreeMap<String, u32>;

fn record_best(scores: &mut ScoreMap, wallet: &WalletAddress, score: u32) -> bool {
    match scores.get_mut(wallet.as_str()) {
        Some(best) if *best >= score => false,
        Some(best) => {
            *best = score;
            true
        }
        None => {
            scores.insert(wallet.as_str().to_string(), score);
            true
        }
    }
}

fn ranked(scores: &ScoreMap, limit: usize) -> Vec<LeaderboardEntry> {
    // Map order is wallet ascending; the stable sort keeps it for ties.
    let mut rows: Vec<(&String, &u32)> = scores.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1));
    rows.into_iter()
        .take(limit)
        .map(|(wallet, &score)| LeaderboardEntry {
            wallet_address: wallet.clone(),
            score,
        })
        .collect()
}

/// Re-key loaded scores by canonical wallet address.
///
/// Spellings of one wallet collapse to its best score; keys that are not
/// wallet addresses are dropped.
fn normalized(raw: ScoreMap) -> ScoreMap {
    let mut scores = ScoreMap::new();
    for (key, score) in raw {
        match WalletAddress::parse(&key) {
            Ok(wallet) => {
                record_best(&mut scores, &wallet, score);
            }
            Err(_) => warn!(key = %key, "dropping leaderboard entry with invalid wallet"),
        }
    }
    scores
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: ScoreMap,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn submit(&mut self, wallet: &WalletAddress, score: u32) -> LeaderboardResult<bool> {
        Ok(record_best(&mut self.scores, wallet, score))
    }

    fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        ranked(&self.scores, limit)
    }

    fn reset(&mut self) -> LeaderboardResult<()> {
        self.scores.clear();
        Ok(())
    }

    fn len(&self) -> usize {
        self.scores.len()
    }
}

/// Store persisted as a JSON object at `path`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    scores: ScoreMap,
}

impl JsonFileStore {
    /// Load `path`, creating it as `{}` when missing.
    pub fn open(path: impl Into<PathBuf>) -> LeaderboardResult<Self> {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => ScoreMap::new(),
            Ok(text) => normalized(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "creating empty leaderboard file");
                let store = Self {
                    path,
                    scores: ScoreMap::new(),
                };
                store.persist()?;
                return Ok(store);
            }
            Err(e) => return Err(e.into()),
        };
        info!(path = %path.display(), wallets = scores.len(), "leaderboard loaded");
        Ok(Self { path, scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a sibling temp file, then rename over the target.
    fn persist(&self) -> LeaderboardResult<()> {
        let json = serde_json::to_string_pretty(&self.scores)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "leaderboard persisted");
        Ok(())
    }
}

impl ScoreStore for JsonFileStore {
    fn submit(&mut self, wallet: &WalletAddress, score: u32) -> LeaderboardResult<bool> {
        let previous = self.scores.get(wallet.as_str()).copied();
        if !record_best(&mut self.scores, wallet, score) {
            return Ok(false);
        }
        if let Err(e) = self.persist() {
            // Keep memory in line with the file.
            match previous {
                Some(best) => self.scores.insert(wallet.as_str().to_string(), best),
                None => self.scores.remove(wallet.as_str()),
            };
            return Err(e);
        }
        Ok(true)
    }

    fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        ranked(&self.scores, limit)
    }

    fn reset(&mut self) -> LeaderboardResult<()> {
        let previous = std::mem::take(&mut self.scores);
        if let Err(e) = self.persist() {
            self.scores = previous;
            return Err(e);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(n: u8) -> WalletAddress {
        WalletAddress::parse(&format!("0x{}", format!("{n:02x}").repeat(20))).unwrap()
    }

    #[test]
    fn test_keeps_best_score_per_wallet() {
        let mut store = MemoryStore::new();
        assert!(store.submit(&wallet(1), 500).unwrap());
        assert!(!store.submit(&wallet(1), 300).unwrap());
        assert!(!store.submit(&wallet(1), 500).unwrap());
        assert!(store.submit(&wallet(1), 900).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.top(10)[0].score, 900);
    }

    #[test]
    fn test_first_submission_is_stored_even_at_zero() {
        let mut store = MemoryStore::new();
        assert!(store.submit(&wallet(7), 0).unwrap());
        assert_eq!(store.top(1)[0].score, 0);
    }

    #[test]
    fn test_top_sorted_with_ties_by_wallet() {
        let mut store = MemoryStore::new();
        store.submit(&wallet(3), 100).unwrap();
        store.submit(&wallet(1), 300).unwrap();
        store.submit(&wallet(2), 100).unwrap();
        store.submit(&wallet(4), 200).unwrap();

        let top = store.top(10);
        let scores: Vec<u32> = top.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100, 100]);
        assert_eq!(top[2].wallet_address, wallet(2).as_str());
        assert_eq!(top[3].wallet_address, wallet(3).as_str());

        assert_eq!(store.top(2).len(), 2);
        assert!(store.top(0).is_empty());
    }

    #[test]
    fn test_loaded_keys_are_canonical() {
        let mut raw = ScoreMap::new();
        raw.insert("0xABABABABABABABABABABABABABABABABABABABAB".into(), 400);
        raw.insert("0xabababababababababababababababababababab".into(), 250);
        raw.insert("not-a-wallet".into(), 999);

        let scores = normalized(raw);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get("0xabababababababababababababababababababab"), Some(&400));
    }

    #[test]
    fn test_reset_empties_store() {
        let mut store = MemoryStore::new();
        store.submit(&wallet(1), 10).unwrap();
        store.reset().unwrap();
        assert!(store.is_empty());
        assert!(store.top(10).is_empty());
    }
}
