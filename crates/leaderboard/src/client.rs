//! Async client used by the game to submit scores and read the board.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::error::RemoteError;
use crate::protocol::{Request, Response};
use crate::server::{DEFAULT_HOST, DEFAULT_PORT};
use crate::store::LeaderboardEntry;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Game-side leaderboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Player wallet; no submission happens without one.
    pub wallet: Option<String>,
    pub disabled: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            wallet: None,
            disabled: false,
        }
    }
}

impl ClientConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("HAUNTED_LEADERBOARD_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("HAUNTED_LEADERBOARD_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let wallet = env::var("HAUNTED_WALLET")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let disabled = env::var("HAUNTED_LEADERBOARD_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            host,
            port,
            wallet,
            disabled,
        }
    }

    /// Whether finished sessions should be submitted.
    pub fn submits(&self) -> bool {
        !self.disabled && self.wallet.is_some()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardClient {
    addr: String,
    timeout: Duration,
}

impl LeaderboardClient {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.addr())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send one request on a fresh connection and read its response.
    pub async fn request(&self, request: &Request) -> Result<Response> {
        tokio::time::timeout(self.timeout, self.exchange(request))
            .await
            .map_err(|_| anyhow!("leaderboard at {} timed out", self.addr))?
    }

    async fn exchange(&self, request: &Request) -> Result<Response> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .with_context(|| format!("connecting to leaderboard at {}", self.addr))?;
        let (read_half, mut write_half) = stream.into_split();

        let mut line = serde_json::to_vec(request)?;
        line.push(b'\n');
        write_half.write_all(&line).await?;
        write_half.flush().await?;

        let mut lines = BufReader::new(read_half).lines();
        let reply = lines
            .next_line()
            .await?
            .ok_or_else(|| anyhow!("leaderboard closed the connection"))?;
        Ok(serde_json::from_str(&reply)?)
    }

    /// Submit a score; returns whether it became the wallet's new best.
    pub async fn submit(&self, wallet: &str, score: u32) -> Result<bool> {
        let request = Request::Submit {
            wallet_address: wallet.to_string(),
            score,
        };
        match self.request(&request).await? {
            Response::Ok { updated, .. } => Ok(updated),
            other => Err(unexpected(other)),
        }
    }

    pub async fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        match self.request(&Request::Leaderboard { limit }).await? {
            Response::Leaderboard { entries } => Ok(entries),
            other => Err(unexpected(other)),
        }
    }

    pub async fn reset(&self, admin_wallet: &str) -> Result<()> {
        let request = Request::Reset {
            wallet_address: admin_wallet.to_string(),
        };
        match self.request(&request).await? {
            Response::Ok { .. } => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

/// Error responses become [`RemoteError`] so callers can inspect the code.
fn unexpected(response: Response) -> anyhow::Error {
    match response {
        Response::Error { code, message } => RemoteError { code, message }.into(),
        other => anyhow!("unexpected response: {:?}", other),
    }
}
