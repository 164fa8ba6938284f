//! Leaderboard errors and their wire error codes.

use thiserror::Error;

use crate::protocol::ErrorCode;

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("invalid wallet address: {0:?}")]
    InvalidWallet(String),

    #[error("score {score} for {wallet} failed verification")]
    VerificationFailed { wallet: String, score: u32 },

    #[error("wallet {0} may not reset the leaderboard")]
    Forbidden(String),

    #[error("leaderboard storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("leaderboard file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LeaderboardError {
    /// Error code reported to clients.
    pub fn code(&self) -> ErrorCode {
        match self {
            LeaderboardError::InvalidWallet(_) | LeaderboardError::VerificationFailed { .. } => {
                ErrorCode::BadRequest
            }
            LeaderboardError::Forbidden(_) => ErrorCode::Forbidden,
            LeaderboardError::Io(_) | LeaderboardError::Json(_) => ErrorCode::Internal,
        }
    }
}

pub type LeaderboardResult<T> = Result<T, LeaderboardError>;

/// Error response received from a leaderboard server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .code.as_str(), .message)]
pub struct RemoteError {
    pub code: ErrorCode,
    pub message: String,
}

impl RemoteError {
    /// Server error code carried by `err`, if the server sent one.
    pub fn code_of(err: &anyhow::Error) -> Option<ErrorCode> {
        err.downcast_ref::<RemoteError>().map(|e| e.code)
    }
}
