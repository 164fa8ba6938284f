//! Wire protocol: one JSON object per line, one response per request.
//!
//! ```text
//! {"type":"submit","wallet_address":"0x...","score":1200}
//! {"type":"leaderboard","limit":10}
//! {"type":"reset","wallet_address":"0x..."}
//! ```

use serde::{Deserialize, Serialize};

use crate::store::LeaderboardEntry;
use crate::types::LEADERBOARD_SIZE;

/// Largest `limit` honored for a leaderboard read.
pub const MAX_LIMIT: usize = 100;

/// Longest request line the server accepts, newline included.
pub const MAX_LINE_BYTES: usize = 4096;

fn default_limit() -> usize {
    LEADERBOARD_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    Submit {
        wallet_address: String,
        score: u32,
    },
    Leaderboard {
        #[serde(default = "default_limit")]
        limit: usize,
    },
    Reset {
        wallet_address: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok {
        message: String,
        updated: bool,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    Forbidden,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::Internal => "internal",
        }
    }
}

impl Response {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Response::Error {
            code,
            message: message.into(),
        }
    }
}

pub fn parse_request(line: &str) -> Result<Request, serde_json::Error> {
    serde_json::from_str(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_submit() {
        let req = parse_request(r#"{"type":"submit","wallet_address":"0xabc","score":1200}"#).unwrap();
        assert_eq!(
            req,
            Request::Submit {
                wallet_address: "0xabc".to_string(),
                score: 1200
            }
        );
    }

    #[test]
    fn test_leaderboard_limit_defaults() {
        let req = parse_request(r#"{"type":"leaderboard"}"#).unwrap();
        assert_eq!(req, Request::Leaderboard { limit: 10 });
    }

    #[test]
    fn test_rejects_unknown_type_and_negative_score() {
        assert!(parse_request(r#"{"type":"hello"}"#).is_err());
        assert!(parse_request(r#"{"type":"submit","wallet_address":"0x","score":-5}"#).is_err());
        assert!(parse_request("not json").is_err());
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(Response::Ok {
            message: "score saved".into(),
            updated: true,
        })
        .unwrap();
        assert_eq!(ok, json!({"type":"ok","message":"score saved","updated":true}));

        let err = serde_json::to_value(Response::error(ErrorCode::Forbidden, "nope")).unwrap();
        assert_eq!(err, json!({"type":"error","code":"forbidden","message":"nope"}));

        let board = serde_json::to_value(Response::Leaderboard {
            entries: vec![LeaderboardEntry {
                wallet_address: "0x01".into(),
                score: 5,
            }],
        })
        .unwrap();
        assert_eq!(
            board,
            json!({"type":"leaderboard","entries":[{"wallet_address":"0x01","score":5}]})
        );
    }
}
