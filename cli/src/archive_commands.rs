use chrono::{DateTime, Local, Utc};
use xo_engine::archive::{ArchiveError, GameArchive, HistoryPlayer};
use xo_engine::games::tictactoe::GameState;
use xo_engine::GameId;

use crate::render::{describe_outcome, render_board};

pub fn summary_line(state: &GameState) -> String {
    let started = DateTime::<Utc>::from_timestamp_millis(state.started_at_ms())
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown time".to_string());

    format!(
        "{}  {}  {}x{} win {}  {} vs {}  {} moves  {}",
        state.id(),
        started,
        state.board_size(),
        state.board_size(),
        state.win_condition(),
        state.player_x(),
        state.player_o(),
        state.moves_played(),
        state.outcome()
    )
}

pub fn list_games(archive: &GameArchive) -> Result<(), ArchiveError> {
    let games = archive.list()?;
    if games.is_empty() {
        println!("No saved games in {}", archive.directory().display());
        return Ok(());
    }
    for game in &games {
        println!("{}", summary_line(game));
    }
    Ok(())
}

/// Prints every position of the game in order.
pub fn inspect_game(archive: &GameArchive, id: &GameId) -> Result<(), ArchiveError> {
    let mut player = HistoryPlayer::new(archive.load(id)?);
    println!("{}", summary_line(player.game()));
    println!();
    print!("{}", render_board(player.current_board()));

    while let Some((pos, mark)) = player.step_forward() {
        println!();
        println!("Move {}: {} at {} {}", player.current_index(), mark, pos.x, pos.y);
        print!("{}", render_board(player.current_board()));
    }

    println!();
    let game = player.into_game();
    println!("{}", describe_outcome(&game));
    Ok(())
}

pub fn delete_game(archive: &GameArchive, id: &GameId) -> Result<(), ArchiveError> {
    archive.delete(id)?;
    println!("Deleted {}", id);
    Ok(())
}

pub fn clear_games(archive: &GameArchive) -> Result<(), ArchiveError> {
    let removed = archive.delete_all()?;
    println!("Deleted {} saved games", removed);
    Ok(())
}
