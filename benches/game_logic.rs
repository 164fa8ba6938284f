use criterion::{black_box, criterion_group, criterion_main, Criterion};
use haunted_blocks::core::{Board, GameSnapshot, GameState, Piece, PieceGenerator, RngSource};
use haunted_blocks::types::{Direction, ShapeKind, Skin};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start_game();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            if !state.is_running() {
                state.start_game();
            }
            black_box(state.tick());
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut board = Board::new();
    // Fill bottom 4 rows
    for row in 16..20 {
        for col in 0..10 {
            board = board.with_cell(row, col, Some(Skin::Ghost)).unwrap();
        }
    }

    c.bench_function("clear_4_rows", |b| {
        b.iter(|| black_box(board.with_full_rows_cleared()))
    });
}

fn bench_piece_draw(c: &mut Criterion) {
    let mut generator = PieceGenerator::new(RngSource::seeded(12345));

    c.bench_function("draw_piece", |b| b.iter(|| black_box(generator.draw())));
}

fn bench_move(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start_game();

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            if !state.move_piece(black_box(Direction::Right)) {
                state.move_piece(Direction::Left);
            }
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let board = Board::new();
    let piece = Piece::spawn(ShapeKind::T, Skin::Bat).at(10, 3);

    c.bench_function("collides", |b| b.iter(|| black_box(board.collides(black_box(&piece)))));
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start_game();
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| b.iter(|| state.snapshot_into(black_box(&mut snap))));
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_piece_draw,
    bench_move,
    bench_collides,
    bench_snapshot
);
criterion_main!(benches);
