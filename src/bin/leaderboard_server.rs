//! Leaderboard server binary.
//!
//! Serves the JSON-file backed leaderboard over line-delimited JSON/TCP.
//! Configuration comes from `HAUNTED_LEADERBOARD_*` and `HAUNTED_ADMIN_WALLET`.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use haunted_blocks::leaderboard::{run_server, JsonFileStore, Leaderboard, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        path = %config.store_path.display(),
        admin = config.admin_wallet.is_some(),
        "starting leaderboard server"
    );

    let store = JsonFileStore::open(&config.store_path)
        .with_context(|| format!("opening {}", config.store_path.display()))?;
    let leaderboard = Leaderboard::new(store).with_admin(config.admin_wallet.clone());

    run_server(config, leaderboard, None).await
}
