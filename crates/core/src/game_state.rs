//! Game state module - the session state machine
//!
//! Ties together the board, the piece generator and scoring. A session moves
//! `Idle -> Running -> GameOver`; `start_game` resets from any state.
//!
//! Every operation is total. Calling a mutating operation while the session
//! is not `Running` is a silent no-op, and candidate positions are always
//! collision-tested before they are applied.

use tracing::debug;

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::Piece;
use crate::rng::{DefaultSource, PieceGenerator, RandomSource, RngSource};
use crate::scoring::line_clear_points;
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameAction, LockEvent, RunState, TETRIS_LINES};

/// Result of a downward step (soft drop or gravity tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Session not running; nothing happened.
    Ignored,
    /// The active piece moved down one row.
    Moved,
    /// The active piece settled.
    Locked(LockEvent),
}

/// True iff `piece` overlaps a wall, the floor, or a settled cell of `board`.
pub fn collides(piece: &Piece, board: &Board) -> bool {
    board.collides(piece)
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = DefaultSource> {
    board: Board,
    active: Option<Piece>,
    next: Option<Piece>,
    generator: PieceGenerator<S>,
    config: GameConfig,
    run_state: RunState,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    /// Monotonic session id (increments on every start).
    session_id: u32,
    /// Last lock outcome (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState<DefaultSource> {
    /// Create an idle game; pieces come from `config.seed` or OS entropy
    pub fn new(config: GameConfig) -> Self {
        let source = match config.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        Self::with_source(config, source)
    }

    /// Create an idle game with a reproducible piece sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig {
            seed: Some(seed),
            ..GameConfig::default()
        })
    }
}

impl<S: RandomSource> GameState<S> {
    /// Create an idle game drawing pieces from `source`
    pub fn with_source(config: GameConfig, source: S) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            generator: PieceGenerator::new(source),
            config,
            run_state: RunState::Idle,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            session_id: 0,
            last_event: None,
        }
    }

    /// Reset everything and enter `Running`
    pub fn start_game(&mut self) {
        self.board = Board::new();
        self.active = Some(self.generator.draw());
        self.next = Some(self.generator.draw());
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.last_event = None;
        self.session_id = self.session_id.wrapping_add(1);
        self.run_state = RunState::Running;
        debug!(session = self.session_id, "session started");
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_piece(&self) -> Option<Piece> {
        self.next
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active;
        out.next = self.next;
        out.run_state = self.run_state;
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
        out.session_id = self.session_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Running session's active piece, or `None` when input must be ignored.
    fn playable_piece(&self) -> Option<Piece> {
        if self.run_state != RunState::Running {
            return None;
        }
        self.active
    }

    /// Shift the active piece one column; returns whether it moved
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let candidate = active.translated(0, direction.dx());
        if self.board.collides(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Rotate the active piece clockwise in place; rejected on collision
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let candidate = active.rotated();
        if self.board.collides(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Move the active piece down one row, locking it if it cannot move
    pub fn soft_drop(&mut self) -> StepOutcome {
        let Some(active) = self.playable_piece() else {
            return StepOutcome::Ignored;
        };

        let candidate = active.translated(1, 0);
        if self.board.collides(&candidate) {
            return StepOutcome::Locked(self.lock_piece(active));
        }
        self.active = Some(candidate);
        StepOutcome::Moved
    }

    /// One gravity step, driven by the external scheduler
    pub fn tick(&mut self) -> StepOutcome {
        self.soft_drop()
    }

    /// Settle `active`, clear rows, score, and promote the next piece.
    ///
    /// If the promoted piece cannot spawn the session ends; the merged board
    /// is not committed and the pieces stay where they were.
    fn lock_piece(&mut self, active: Piece) -> LockEvent {
        let merged = self.board.with_piece_merged(&active);
        let (cleared_board, cleared) = merged.with_full_rows_cleared();

        let points = line_clear_points(cleared, self.config.scoring);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let candidate = self.next.unwrap_or_else(|| self.generator.draw());
        let game_over = cleared_board.collides(&candidate);

        if game_over {
            self.run_state = RunState::GameOver;
            debug!(
                session = self.session_id,
                score = self.score,
                lines = self.lines,
                "spawn blocked, game over"
            );
        } else {
            self.board = cleared_board;
            self.active = Some(candidate);
            self.next = Some(self.generator.draw());
        }

        let event = LockEvent {
            cleared: cleared as u32,
            points,
            tetris: cleared == TETRIS_LINES,
            game_over,
        };
        if cleared > 0 {
            debug!(cleared, points, score = self.score, "rows cleared");
        }
        self.last_event = Some(event);
        event
    }

    /// Apply a game action; returns whether the session changed
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left),
            GameAction::MoveRight => self.move_piece(Direction::Right),
            GameAction::SoftDrop => self.soft_drop() != StepOutcome::Ignored,
            GameAction::Rotate => self.rotate(),
            GameAction::Start => {
                self.start_game();
                true
            }
        }
    }
}

impl Default for GameState<DefaultSource> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
