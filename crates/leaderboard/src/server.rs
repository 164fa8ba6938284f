//! TCP server for the leaderboard
//!
//! Handles incoming connections, one task per client. Every client shares one
//! [`Leaderboard`] behind a `tokio::sync::Mutex`, so submissions and resets
//! are applied one at a time.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Mutex};
use tracing::{error, info, warn};

use crate::protocol::{parse_request, ErrorCode, Request, Response, MAX_LIMIT, MAX_LINE_BYTES};
use crate::service::Leaderboard;
use crate::store::ScoreStore;
use crate::wallet::WalletAddress;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 7878;
pub const DEFAULT_STORE_PATH: &str = "leaderboard.json";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store_path: PathBuf,
    /// Only this wallet may reset the leaderboard.
    pub admin_wallet: Option<WalletAddress>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            admin_wallet: None,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables.
    ///
    /// An admin wallet that does not parse is ignored (with a warning), which
    /// leaves reset disabled.
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("HAUNTED_LEADERBOARD_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("HAUNTED_LEADERBOARD_PORT")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let store_path = env::var("HAUNTED_LEADERBOARD_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let admin_wallet = env::var("HAUNTED_ADMIN_WALLET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| match WalletAddress::parse(&s) {
                Ok(wallet) => Some(wallet),
                Err(e) => {
                    warn!("ignoring HAUNTED_ADMIN_WALLET: {}", e);
                    None
                }
            });

        Self {
            host,
            port,
            store_path,
            admin_wallet,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

type Shared<S> = Arc<Mutex<Leaderboard<S>>>;

/// Start the TCP server.
///
/// When `ready_tx` is given it receives the bound address once the listener
/// is up (useful with port 0).
pub async fn run_server<S>(
    config: ServerConfig,
    leaderboard: Leaderboard<S>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()>
where
    S: ScoreStore + 'static,
{
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("binding leaderboard server to {}", config.bind_addr()))?;
    let local = listener.local_addr()?;
    info!(addr = %local, "leaderboard server listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(local);
    }

    let shared: Shared<S> = Arc::new(Mutex::new(leaderboard));
    let mut client_id_counter = 0usize;

    loop {
        let (socket, addr) = listener.accept().await?;
        client_id_counter += 1;
        let client_id = client_id_counter;
        info!(client_id, %addr, "client connected");

        let shared = Arc::clone(&shared);
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, shared).await {
                warn!(client_id, "client error: {:#}", e);
            }
            info!(client_id, "client disconnected");
        });
    }
}

async fn handle_client<S: ScoreStore>(socket: TcpStream, shared: Shared<S>) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = (&mut reader)
            .take(MAX_LINE_BYTES as u64)
            .read_line(&mut line)
            .await?;
        if bytes_read == 0 {
            break;
        }
        if bytes_read >= MAX_LINE_BYTES && !line.ends_with('\n') {
            warn!(limit = MAX_LINE_BYTES, "request line too long");
            let response = Response::error(
                ErrorCode::BadRequest,
                format!("request line exceeds {MAX_LINE_BYTES} bytes"),
            );
            write_response(&mut writer, &response).await?;
            skip_line(&mut reader).await?;
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match parse_request(trimmed) {
            Ok(request) => {
                let mut leaderboard = shared.lock().await;
                handle_request(&mut leaderboard, request)
            }
            Err(e) => Response::error(ErrorCode::BadRequest, format!("malformed request: {e}")),
        };
        write_response(&mut writer, &response).await?;
    }

    Ok(())
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> anyhow::Result<()> {
    let mut out = serde_json::to_vec(response)?;
    out.push(b'\n');
    writer.write_all(&out).await?;
    writer.flush().await?;
    Ok(())
}

/// Discard input up to and including the next newline.
async fn skip_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(());
        }
        match buf.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let n = buf.len();
                reader.consume(n);
            }
        }
    }
}

/// Apply one request to the leaderboard and build its response.
pub fn handle_request<S: ScoreStore>(leaderboard: &mut Leaderboard<S>, request: Request) -> Response {
    let result = match request {
        Request::Submit {
            wallet_address,
            score,
        } => leaderboard
            .submit(&wallet_address, score)
            .map(|updated| Response::Ok {
                message: if updated {
                    "score saved".to_string()
                } else {
                    "existing score is higher".to_string()
                },
                updated,
            }),
        Request::Leaderboard { limit } => Ok(Response::Leaderboard {
            entries: leaderboard.top(limit.min(MAX_LIMIT)),
        }),
        Request::Reset { wallet_address } => {
            leaderboard.reset(&wallet_address).map(|()| Response::Ok {
                message: "leaderboard reset".to_string(),
                updated: true,
            })
        }
    };

    result.unwrap_or_else(|e| {
        let code = e.code();
        if code == ErrorCode::Internal {
            error!("leaderboard request failed: {}", e);
        }
        Response::error(code, e.to_string())
    })
}
