//! Integration tests for whole sessions driven through the public API

use crossterm::event::{KeyCode, KeyEvent};

use haunted_blocks::core::{GameConfig, GameState, ScoringRules, ScriptedSource, StepOutcome};
use haunted_blocks::input::handle_key_event_in;
use haunted_blocks::types::{Direction, GameAction, RunState, ShapeKind, Skin};

fn game_of(kind: ShapeKind, skin: Skin) -> GameState<ScriptedSource> {
    let mut game = GameState::with_source(GameConfig::default(), ScriptedSource::repeating(kind, skin));
    game.start_game();
    game
}

fn shift(game: &mut GameState<ScriptedSource>, dx: i8) {
    let direction = if dx < 0 { Direction::Left } else { Direction::Right };
    for _ in 0..dx.unsigned_abs() {
        assert!(game.move_piece(direction));
    }
}

fn drop_to_lock(game: &mut GameState<ScriptedSource>) -> StepOutcome {
    loop {
        match game.soft_drop() {
            StepOutcome::Moved => continue,
            other => return other,
        }
    }
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::with_seed(12345);
    assert_eq!(game.run_state(), RunState::Idle);

    assert!(game.apply_action(GameAction::Start));
    assert_eq!(game.run_state(), RunState::Running);
    assert!(game.active().is_some());
    assert!(game.next_piece().is_some());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::with_seed(99);
    let mut b = GameState::with_seed(99);
    a.start_game();
    b.start_game();
    for _ in 0..200 {
        assert_eq!(a.active(), b.active());
        assert_eq!(a.next_piece(), b.next_piece());
        a.tick();
        b.tick();
    }
}

#[test]
fn test_five_o_pieces_clear_two_rows() {
    let mut game = game_of(ShapeKind::O, Skin::Pumpkin);
    for dx in [-4, -2, 0, 2, 4] {
        shift(&mut game, dx);
        assert!(matches!(drop_to_lock(&mut game), StepOutcome::Locked(_)));
    }
    assert_eq!(game.score(), 200);
    assert_eq!(game.lines(), 2);
    assert_eq!(game.pieces_locked(), 5);
    assert!(game.board().is_empty());
}

fn press(game: &mut GameState<ScriptedSource>, code: KeyCode) {
    if let Some(action) = handle_key_event_in(KeyEvent::from(code), game.run_state()) {
        game.apply_action(action);
    }
}

#[test]
fn test_start_keys_do_not_restart_running_session() {
    let mut game = game_of(ShapeKind::O, Skin::Pumpkin);
    for dx in [-4, -2, 0, 2, 4] {
        shift(&mut game, dx);
        drop_to_lock(&mut game);
    }
    assert_eq!(game.score(), 200);

    press(&mut game, KeyCode::Char(' '));
    press(&mut game, KeyCode::Enter);
    assert_eq!(game.run_state(), RunState::Running);
    assert_eq!(game.score(), 200);
    assert_eq!(game.lines(), 2);
    assert_eq!(game.session_id(), 1);
}

#[test]
fn test_start_key_retries_after_game_over() {
    let mut game = game_of(ShapeKind::O, Skin::Bat);
    while game.is_running() {
        drop_to_lock(&mut game);
    }
    press(&mut game, KeyCode::Char(' '));
    assert!(game.is_running());
    assert_eq!(game.score(), 0);
    assert_eq!(game.session_id(), 2);
}

#[test]
fn test_ten_vertical_i_pieces_score_a_tetris() {
    let mut game = game_of(ShapeKind::I, Skin::Ghost);
    let mut last = None;
    for col in 0..10i8 {
        assert!(game.rotate());
        let start = game.active().unwrap().col;
        shift(&mut game, col - start);
        if let StepOutcome::Locked(event) = drop_to_lock(&mut game) {
            last = Some(event);
        }
    }
    let event = last.unwrap();
    assert_eq!(event.cleared, 4);
    assert!(event.tetris);
    assert_eq!(event.points, 1000);
    assert_eq!(game.score(), 1000);
    assert!(game.board().is_empty());
}

#[test]
fn test_tetris_bonus_can_be_disabled() {
    let config = GameConfig {
        scoring: ScoringRules {
            tetris_bonus: false,
        },
        ..GameConfig::default()
    };
    let mut game = GameState::with_source(config, ScriptedSource::repeating(ShapeKind::I, Skin::Bat));
    game.start_game();
    for col in 0..10i8 {
        game.rotate();
        let start = game.active().unwrap().col;
        shift(&mut game, col - start);
        drop_to_lock(&mut game);
    }
    assert_eq!(game.score(), 400);
}

#[test]
fn test_stacking_in_center_ends_session() {
    let mut game = game_of(ShapeKind::O, Skin::Skull);
    let mut locks = 0;
    while game.is_running() {
        drop_to_lock(&mut game);
        locks += 1;
        assert!(locks <= 10, "session should have ended");
    }
    assert_eq!(locks, 10);
    assert_eq!(game.run_state(), RunState::GameOver);
    assert_eq!(game.pieces_locked(), 10);
    // The blocked lock is not written to the board.
    assert_eq!(game.board().occupied_count(), 36);

    let snapshot = game.snapshot();
    for _ in 0..10 {
        assert_eq!(game.tick(), StepOutcome::Ignored);
        assert!(!game.apply_action(GameAction::MoveLeft));
        assert!(!game.apply_action(GameAction::SoftDrop));
    }
    assert_eq!(game.snapshot(), snapshot);
}

#[test]
fn test_restart_clears_everything() {
    let mut game = game_of(ShapeKind::O, Skin::Bat);
    while game.is_running() {
        drop_to_lock(&mut game);
    }
    game.apply_action(GameAction::Start);
    assert!(game.is_running());
    assert!(game.board().is_empty());
    assert_eq!((game.score(), game.lines(), game.pieces_locked()), (0, 0, 0));
    assert_eq!(game.session_id(), 2);
}

#[test]
fn test_last_event_reports_game_over() {
    let mut game = game_of(ShapeKind::O, Skin::Ghost);
    let mut final_event = None;
    while game.is_running() {
        drop_to_lock(&mut game);
        if let Some(event) = game.take_last_event() {
            final_event = Some(event);
        }
    }
    let event = final_event.unwrap();
    assert!(event.game_over);
    assert_eq!(event.cleared, 0);
}
