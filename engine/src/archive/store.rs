use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::games::tictactoe::GameState;
use crate::log;
use crate::GameId;
use super::file_io::{generate_archive_filename, load_game, save_game};
use super::{ARCHIVE_FILE_EXTENSION, ArchiveError};

/// Directory of saved games, one file per game.
pub struct GameArchive {
    directory: PathBuf,
}

impl GameArchive {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Saving a game that is already archived replaces the old file. The old
    /// file is only removed once the new one has been written.
    pub fn save(&self, state: &GameState) -> Result<PathBuf, ArchiveError> {
        std::fs::create_dir_all(&self.directory)?;

        let existing = self.find_path(state.id())?;
        let path = self.directory.join(generate_archive_filename(state));
        save_game(&path, state)?;

        if let Some(stale) = existing.filter(|old| *old != path) {
            std::fs::remove_file(stale)?;
        }
        log!("Saved game {} to {}", state.id(), path.display());
        Ok(path)
    }

    pub fn load(&self, id: &GameId) -> Result<GameState, ArchiveError> {
        let path = self
            .find_path(id)?
            .ok_or_else(|| ArchiveError::NotFound(id.clone()))?;
        load_game(&path)
    }

    /// All readable games, newest first. Files that fail to load are skipped.
    pub fn list(&self) -> Result<Vec<GameState>, ArchiveError> {
        let mut games = Vec::new();
        for path in self.archive_files()? {
            match load_game(&path) {
                Ok(game) => games.push(game),
                Err(e) => log!("Skipping unreadable archive {}: {}", path.display(), e),
            }
        }
        games.sort_by(|a, b| b.started_at_ms().cmp(&a.started_at_ms()));
        Ok(games)
    }

    pub fn delete(&self, id: &GameId) -> Result<(), ArchiveError> {
        let path = self
            .find_path(id)?
            .ok_or_else(|| ArchiveError::NotFound(id.clone()))?;
        std::fs::remove_file(path)?;
        log!("Deleted game {}", id);
        Ok(())
    }

    /// Returns how many files were removed.
    pub fn delete_all(&self) -> Result<usize, ArchiveError> {
        let files = self.archive_files()?;
        for path in &files {
            std::fs::remove_file(path)?;
        }
        log!("Deleted {} archived games", files.len());
        Ok(files.len())
    }

    fn find_path(&self, id: &GameId) -> Result<Option<PathBuf>, ArchiveError> {
        let suffix = format!("_{}", id);
        Ok(self.archive_files()?.into_iter().find(|path| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| stem.ends_with(&suffix))
        }))
    }

    fn archive_files(&self) -> Result<Vec<PathBuf>, ArchiveError> {
        let entries = match std::fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_archive = path
                .extension()
                .is_some_and(|ext| ext == ARCHIVE_FILE_EXTENSION);
            if is_archive && path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
