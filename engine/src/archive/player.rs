use crate::games::tictactoe::{Board, GameState, Mark, Position};

/// Steps through a finished (or unfinished) game one snapshot at a time.
///
/// Index 0 is the empty board; index `total_moves()` is the final position.
pub struct HistoryPlayer {
    game: GameState,
    current_index: usize,
}

impl HistoryPlayer {
    pub fn new(game: GameState) -> Self {
        Self {
            game,
            current_index: 0,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn total_moves(&self) -> usize {
        self.game.moves_played()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.total_moves()
    }

    pub fn current_board(&self) -> &Board {
        &self.game.history()[self.current_index]
    }

    /// The game as it stood at the current snapshot.
    pub fn current_state(&self) -> GameState {
        self.game
            .at_move(self.current_index)
            .unwrap_or_else(|| self.game.clone())
    }

    pub fn peek_next_move(&self) -> Option<(Position, Mark)> {
        self.game.move_at(self.current_index + 1)
    }

    pub fn step_forward(&mut self) -> Option<(Position, Mark)> {
        let next = self.peek_next_move()?;
        self.current_index += 1;
        Some(next)
    }

    /// Returns the move that was undone.
    pub fn step_back(&mut self) -> Option<(Position, Mark)> {
        if self.current_index == 0 {
            return None;
        }
        let undone = self.game.move_at(self.current_index);
        self.current_index -= 1;
        undone
    }

    /// Jumps to `index`, clamped to the last snapshot.
    pub fn seek(&mut self, index: usize) {
        self.current_index = index.min(self.total_moves());
    }

    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    pub fn into_game(self) -> GameState {
        self.game
    }
}
