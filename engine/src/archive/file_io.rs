use std::path::Path;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::games::tictactoe::GameState;
use super::{ARCHIVE_FILE_EXTENSION, ARCHIVE_VERSION, ArchiveError};

#[derive(Serialize)]
struct ArchiveFileRef<'a> {
    version: u8,
    game: &'a GameState,
}

#[derive(Deserialize)]
struct ArchiveHeader {
    version: Option<u8>,
}

#[derive(Deserialize)]
struct ArchiveFile {
    game: GameState,
}

pub fn save_game(path: &Path, state: &GameState) -> Result<(), ArchiveError> {
    std::fs::write(path, save_game_to_string(state)?)?;
    Ok(())
}

pub fn save_game_to_string(state: &GameState) -> Result<String, ArchiveError> {
    let file = ArchiveFileRef {
        version: ARCHIVE_VERSION,
        game: state,
    };
    Ok(serde_yaml_ng::to_string(&file)?)
}

pub fn load_game(path: &Path) -> Result<GameState, ArchiveError> {
    let content = std::fs::read_to_string(path)?;
    load_game_from_str(&content)
}

/// The version is checked before the game itself is parsed, so files from a
/// newer format fail with `UnsupportedVersion` rather than a parse error.
pub fn load_game_from_str(content: &str) -> Result<GameState, ArchiveError> {
    if content.trim().is_empty() {
        return Err(ArchiveError::EmptyFile);
    }

    let header: ArchiveHeader = serde_yaml_ng::from_str(content)?;
    let version = header.version.unwrap_or(0);
    if version != ARCHIVE_VERSION {
        return Err(ArchiveError::UnsupportedVersion {
            found: version,
            expected: ARCHIVE_VERSION,
        });
    }

    let file: ArchiveFile = serde_yaml_ng::from_str(content)?;
    Ok(file.game)
}

pub fn generate_archive_filename(state: &GameState) -> String {
    let timestamp = DateTime::<Utc>::from_timestamp_millis(state.started_at_ms())
        .map(|utc| utc.with_timezone(&Local).format("%Y%m%d%H%M%S").to_string())
        .unwrap_or_else(|| "00000000000000".to_string());

    format!("{}_{}.{}", timestamp, state.id(), ARCHIVE_FILE_EXTENSION)
}
