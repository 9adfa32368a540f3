use std::error::Error;
use std::io::Write;

use tokio::io::{AsyncBufRead, Lines};
use xo_engine::games::SessionRng;
use xo_engine::games::tictactoe::{choose_move_with_rng, GameState};
use xo_engine::{log, PlayerId};

use crate::render::{describe_outcome, parse_move, render_board};

const QUIT_COMMANDS: [&str; 3] = ["q", "quit", "exit"];

/// Runs `state` to completion. Players listed in `humans` are asked for
/// moves on `input`; everyone else is played by the bot.
///
/// Returns `None` when a human quits or the input ends before the game does.
pub async fn run_game<R>(
    mut state: GameState,
    humans: &[PlayerId],
    input: &mut Lines<R>,
    mut rng: SessionRng,
) -> Result<Option<GameState>, Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
{
    log!(
        "[game:{}] Started {}x{} (win {}), X: {}, O: {}, seed {}",
        state.id(),
        state.board_size(),
        state.board_size(),
        state.win_condition(),
        state.player_x(),
        state.player_o(),
        rng.seed()
    );
    print!("{}", render_board(state.board()));

    while !state.is_over() {
        let player = state.current_player().clone();

        if humans.contains(&player) {
            print!("{} ({}), enter \"x y\": ", player, state.current_mark());
            std::io::stdout().flush()?;

            let Some(line) = input.next_line().await? else {
                println!();
                println!("Input closed, game abandoned");
                return Ok(None);
            };
            if QUIT_COMMANDS.contains(&line.trim()) {
                println!("Game abandoned");
                return Ok(None);
            }

            let pos = match parse_move(&line) {
                Ok(pos) => pos,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            match state.add_move(&player, pos.x, pos.y) {
                Ok(next) => state = next,
                Err(e) => {
                    println!("Move rejected: {}", e);
                    continue;
                }
            }
        } else {
            let snapshot = state.clone();
            let (result, returned_rng) = tokio::task::spawn_blocking(move || {
                let result = choose_move_with_rng(&snapshot, &player, &mut rng);
                (result, rng)
            })
            .await?;
            rng = returned_rng;
            state = result?;

            if let Some((pos, mark)) = state.last_move() {
                println!("{} ({}) plays {} {}", state.player_for(mark).map_or("?", |p| p.as_str()), mark, pos.x, pos.y);
            }
        }

        print!("{}", render_board(state.board()));
    }

    println!("{}", describe_outcome(&state));
    log!("[game:{}] Finished after {} moves: {}", state.id(), state.moves_played(), state.outcome());
    Ok(Some(state))
}
