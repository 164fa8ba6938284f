//! JSON-file leaderboard store against real files in the temp dir

use std::fs;
use std::path::PathBuf;

use haunted_blocks::leaderboard::{JsonFileStore, Leaderboard, LeaderboardError, ScoreStore, WalletAddress};

const ALICE: &str = "0x1111111111111111111111111111111111111111";
const BOB: &str = "0x2222222222222222222222222222222222222222";
const ADMIN: &str = "0xadadadadadadadadadadadadadadadadadadadad";

/// Fresh path per test; removed on drop.
struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "haunted-blocks-{}-{}.json",
            std::process::id(),
            name
        ));
        let _ = fs::remove_file(&path);
        Self(path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}

fn wallet(s: &str) -> WalletAddress {
    WalletAddress::parse(s).unwrap()
}

#[test]
fn test_missing_file_is_created_empty() {
    let tmp = TempFile::new("missing");
    let store = JsonFileStore::open(&tmp.0).unwrap();
    assert!(store.is_empty());

    let text = fs::read_to_string(&tmp.0).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[test]
fn test_scores_survive_reopen() {
    let tmp = TempFile::new("reopen");
    {
        let mut store = JsonFileStore::open(&tmp.0).unwrap();
        assert!(store.submit(&wallet(ALICE), 800).unwrap());
        assert!(store.submit(&wallet(BOB), 1200).unwrap());
        assert!(!store.submit(&wallet(ALICE), 100).unwrap());
    }

    let text = fs::read_to_string(&tmp.0).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[ALICE], 800);
    assert_eq!(value[BOB], 1200);
    // Pretty-printed, one wallet per line.
    assert!(text.contains('\n'));

    let store = JsonFileStore::open(&tmp.0).unwrap();
    let top = store.top(10);
    assert_eq!(top.len(), 2);
    assert_eq!((top[0].wallet_address.as_str(), top[0].score), (BOB, 1200));
    assert_eq!((top[1].wallet_address.as_str(), top[1].score), (ALICE, 800));
}

#[test]
fn test_existing_file_is_loaded() {
    let tmp = TempFile::new("existing");
    fs::write(&tmp.0, format!("{{\"{ALICE}\": 450}}")).unwrap();

    let mut store = JsonFileStore::open(&tmp.0).unwrap();
    assert_eq!(store.len(), 1);
    assert!(!store.submit(&wallet(ALICE), 400).unwrap());
    assert!(store.submit(&wallet(ALICE), 500).unwrap());
    assert_eq!(store.top(1)[0].score, 500);
}

#[test]
fn test_mixed_case_keys_share_one_entry() {
    let tmp = TempFile::new("mixed-case");
    let checksummed = "0xAbCdEf0123456789aBcDeF0123456789AbCdEf01";
    fs::write(&tmp.0, format!("{{\"{checksummed}\": 700}}")).unwrap();

    let mut store = JsonFileStore::open(&tmp.0).unwrap();
    assert!(!store.submit(&wallet(checksummed), 600).unwrap());
    assert!(store.submit(&wallet(&checksummed.to_lowercase()), 800).unwrap());

    let top = store.top(10);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].wallet_address, checksummed.to_lowercase());
    assert_eq!(top[0].score, 800);
}

#[test]
fn test_corrupt_file_is_a_json_error() {
    let tmp = TempFile::new("corrupt");
    fs::write(&tmp.0, "{ not json").unwrap();
    assert!(matches!(
        JsonFileStore::open(&tmp.0),
        Err(LeaderboardError::Json(_))
    ));
}

#[test]
fn test_admin_reset_persists() {
    let tmp = TempFile::new("reset");
    let store = JsonFileStore::open(&tmp.0).unwrap();
    let mut board = Leaderboard::new(store).with_admin(Some(wallet(ADMIN)));
    board.submit(ALICE, 300).unwrap();
    board.submit(BOB, 900).unwrap();

    assert!(matches!(board.reset(BOB), Err(LeaderboardError::Forbidden(_))));
    assert_eq!(board.top(10).len(), 2);

    board.reset(ADMIN).unwrap();
    assert!(board.top(10).is_empty());

    let reopened = JsonFileStore::open(&tmp.0).unwrap();
    assert!(reopened.is_empty());
}
