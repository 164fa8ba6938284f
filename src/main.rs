//! Haunted Blocks terminal runner (default binary).
//!
//! Owns the terminal: crossterm input, the framebuffer renderer, the gravity
//! timer, the leaderboard hand-off when a session ends, and the admin reset.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use haunted_blocks::core::{GameConfig, GameSnapshot, GameState, GravityTimer};
use haunted_blocks::input::{handle_key_event_in, is_reset_key, should_quit};
use haunted_blocks::leaderboard::{short_label, ClientConfig, ErrorCode, LeaderboardClient, RemoteError};
use haunted_blocks::term::{FrameBuffer, GameView, LeaderboardPanel, PanelRow, TerminalRenderer, Viewport};
use haunted_blocks::types::{LockEvent, FRAME_MS, LEADERBOARD_SIZE};

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env();
    let leaderboard = ClientConfig::from_env();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, &leaderboard, &runtime);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal belongs to the game, so logs only go to `HAUNTED_LOG_PATH`.
fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("HAUNTED_LOG_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
    else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: GameConfig,
    lb_config: &ClientConfig,
    runtime: &Runtime,
) -> Result<()> {
    let mut game = GameState::new(config);
    let mut gravity = GravityTimer::new();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let client = LeaderboardClient::from_config(lb_config);
    let mut panel = (!lb_config.disabled).then(|| LeaderboardPanel {
        wallet: lb_config.wallet.as_deref().map(short_label),
        ..LeaderboardPanel::default()
    });
    if let Some(panel) = panel.as_mut() {
        refresh_panel(runtime, &client, panel);
    }

    info!(seed = ?config.seed, tetris_bonus = config.scoring.tetris_bonus, "game ready");

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into_with_panel(&snap, panel.as_ref(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(score = game.score(), "quit");
                        return Ok(());
                    }
                    if is_reset_key(key) && !game.is_running() {
                        if let Some(panel) = panel.as_mut() {
                            reset_leaderboard(lb_config, runtime, &client, panel);
                        }
                    } else if let Some(action) = handle_key_event_in(key, game.run_state()) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            gravity.follow(game.run_state());
            if gravity.advance(elapsed.as_millis() as u32, game.score()) {
                game.tick();
            }
        }

        if let Some(event) = game.take_last_event() {
            gravity.follow(game.run_state());
            if event.game_over {
                on_game_over(&game, event, lb_config, runtime, &client, panel.as_mut());
            }
        }
    }
}

fn on_game_over(
    game: &GameState,
    event: LockEvent,
    lb_config: &ClientConfig,
    runtime: &Runtime,
    client: &LeaderboardClient,
    panel: Option<&mut LeaderboardPanel>,
) {
    info!(
        session = game.session_id(),
        score = game.score(),
        lines = game.lines(),
        last_clear = event.cleared,
        "game over"
    );

    let Some(panel) = panel else {
        return;
    };
    let Some(wallet) = lb_config.wallet.as_deref().filter(|_| lb_config.submits()) else {
        panel.status = Some("connect a wallet to save".to_string());
        return;
    };

    match runtime.block_on(client.submit(wallet, game.score())) {
        Ok(true) => panel.status = Some("new best saved".to_string()),
        Ok(false) => panel.status = Some("best score kept".to_string()),
        Err(e) => {
            warn!("score submission failed: {:#}", e);
            panel.status = Some("leaderboard offline".to_string());
            return;
        }
    }
    refresh_panel(runtime, client, panel);
}

/// Ask the server to clear the board on behalf of `HAUNTED_WALLET`.
fn reset_leaderboard(
    lb_config: &ClientConfig,
    runtime: &Runtime,
    client: &LeaderboardClient,
    panel: &mut LeaderboardPanel,
) {
    let Some(wallet) = lb_config.wallet.as_deref() else {
        panel.status = Some("connect a wallet to reset".to_string());
        return;
    };

    match runtime.block_on(client.reset(wallet)) {
        Ok(()) => {
            info!(wallet = %short_label(wallet), "leaderboard reset");
            panel.status = Some("leaderboard reset".to_string());
        }
        Err(e) if RemoteError::code_of(&e) == Some(ErrorCode::Forbidden) => {
            warn!(wallet = %short_label(wallet), "reset refused");
            panel.status = Some("forbidden: admin only".to_string());
        }
        Err(e) => {
            warn!("leaderboard reset failed: {:#}", e);
            panel.status = Some("leaderboard offline".to_string());
            return;
        }
    }
    refresh_panel(runtime, client, panel);
}

fn refresh_panel(runtime: &Runtime, client: &LeaderboardClient, panel: &mut LeaderboardPanel) {
    match runtime.block_on(client.top(LEADERBOARD_SIZE)) {
        Ok(entries) => {
            panel.rows = entries
                .into_iter()
                .map(|e| PanelRow {
                    label: short_label(&e.wallet_address),
                    score: e.score,
                })
                .collect();
        }
        Err(e) => {
            warn!("leaderboard fetch failed: {:#}", e);
            panel.status.get_or_insert_with(|| "leaderboard offline".to_string());
        }
    }
}
