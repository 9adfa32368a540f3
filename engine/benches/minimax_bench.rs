use criterion::{criterion_group, criterion_main, Criterion, SamplingMode};
use std::time::Duration;
use xo_engine::games::SessionRng;
use xo_engine::games::tictactoe::{choose_move_with_rng, GameState};
use xo_engine::PlayerId;

fn new_game(size: usize, win_condition: usize) -> GameState {
    GameState::new(size, win_condition, "bench-x", "bench-o").unwrap()
}

fn bench_minimax_10_moves() {
    let mut state = new_game(7, 4);
    let mut session_rng = SessionRng::from_random();

    for _ in 0..10 {
        if state.is_over() {
            break;
        }
        let bot: PlayerId = state.current_player().clone();
        state = choose_move_with_rng(&state, &bot, &mut session_rng).unwrap();
    }
}

fn bench_minimax_single_move_empty_board() {
    let state = new_game(3, 3);
    let bot = state.player_x().clone();
    let mut session_rng = SessionRng::from_random();
    choose_move_with_rng(&state, &bot, &mut session_rng).unwrap();
}

fn bench_minimax_single_move_mid_game() {
    let mut state = new_game(10, 5);
    let moves = [
        (4, 4), (5, 4), (4, 5), (5, 5),
        (3, 3), (6, 6), (2, 2), (7, 7),
        (3, 5), (5, 3), (6, 4), (4, 6),
    ];
    for (x, y) in moves {
        let player = state.current_player().clone();
        state = state.add_move(&player, x, y).unwrap();
    }

    let bot = state.current_player().clone();
    let mut session_rng = SessionRng::from_random();
    choose_move_with_rng(&state, &bot, &mut session_rng).unwrap();
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(10)
        .measurement_time(Duration::from_secs(60));

    group.bench_function("10_moves", |b| {
        b.iter(bench_minimax_10_moves)
    });

    group.bench_function("single_move_empty", |b| {
        b.iter(bench_minimax_single_move_empty_board)
    });

    group.bench_function("single_move_mid_game", |b| {
        b.iter(bench_minimax_single_move_mid_game)
    });

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
