use serde::{Deserialize, Serialize};

use crate::id_generator::generate_game_id;
use crate::{GameId, PlayerId};
use super::board::Board;
use super::error::GameError;
use super::types::{Mark, Outcome, Position, WinningLine};
use super::win_detector::{check_win, check_win_with_line};

/// One game of N×N, K-in-a-row tic-tac-toe.
///
/// The value is never mutated: `add_move` returns a new state whose history
/// is the old one plus a single new snapshot. X always moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameStateRecord", try_from = "GameStateRecord")]
pub struct GameState {
    id: GameId,
    started_at_ms: i64,
    board_size: usize,
    win_condition: usize,
    player_x: PlayerId,
    player_o: PlayerId,
    history: Vec<Board>,
}

/// Plain persisted form of a [`GameState`]. Turning it back into a state goes
/// through [`GameState::restore`], which re-checks every invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateRecord {
    pub id: GameId,
    pub started_at_ms: i64,
    pub board_size: usize,
    pub win_condition: usize,
    pub player_x: PlayerId,
    pub player_o: PlayerId,
    pub history: Vec<Board>,
}

impl GameState {
    pub fn new(
        board_size: usize,
        win_condition: usize,
        player_x: impl Into<PlayerId>,
        player_o: impl Into<PlayerId>,
    ) -> Result<Self, GameError> {
        let player_x = player_x.into();
        let player_o = player_o.into();
        validate_configuration(board_size, win_condition, &player_x, &player_o)?;

        let started_at_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);

        Ok(Self {
            id: generate_game_id(),
            started_at_ms,
            board_size,
            win_condition,
            player_x,
            player_o,
            history: vec![Board::new(board_size)],
        })
    }

    pub fn restore(record: GameStateRecord) -> Result<Self, GameError> {
        validate_configuration(
            record.board_size,
            record.win_condition,
            &record.player_x,
            &record.player_o,
        )?;
        validate_history(&record.history, record.board_size, record.win_condition)?;

        Ok(Self {
            id: record.id,
            started_at_ms: record.started_at_ms,
            board_size: record.board_size,
            win_condition: record.win_condition,
            player_x: record.player_x,
            player_o: record.player_o,
            history: record.history,
        })
    }

    pub fn add_move(&self, player: &PlayerId, x: usize, y: usize) -> Result<GameState, GameError> {
        let mark = self
            .mark_of(player)
            .ok_or_else(|| GameError::InvalidPlayer(player.clone()))?;

        let board = self.board();
        if !board.contains(x, y) {
            return Err(GameError::OutOfBounds {
                x,
                y,
                board_size: self.board_size,
            });
        }

        if board.mark_at(x, y) != Mark::Empty {
            return Err(GameError::CellOccupied { x, y });
        }

        if self.outcome().is_over() {
            return Err(GameError::GameAlreadyOver);
        }

        let mut next = board.clone();
        next.set(x, y, mark);

        let mut history = Vec::with_capacity(self.history.len() + 1);
        history.extend(self.history.iter().cloned());
        history.push(next);

        Ok(GameState {
            id: self.id.clone(),
            started_at_ms: self.started_at_ms,
            board_size: self.board_size,
            win_condition: self.win_condition,
            player_x: self.player_x.clone(),
            player_o: self.player_o.clone(),
            history,
        })
    }

    pub fn id(&self) -> &GameId {
        &self.id
    }

    pub fn started_at_ms(&self) -> i64 {
        self.started_at_ms
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn win_condition(&self) -> usize {
        self.win_condition
    }

    pub fn player_x(&self) -> &PlayerId {
        &self.player_x
    }

    pub fn player_o(&self) -> &PlayerId {
        &self.player_o
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn board(&self) -> &Board {
        // history is never empty: construction and restore both guarantee it
        &self.history[self.history.len() - 1]
    }

    pub fn moves_played(&self) -> usize {
        self.history.len() - 1
    }

    pub fn current_mark(&self) -> Mark {
        if self.moves_played() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn current_player(&self) -> &PlayerId {
        match self.current_mark() {
            Mark::O => &self.player_o,
            _ => &self.player_x,
        }
    }

    pub fn mark_of(&self, player: &PlayerId) -> Option<Mark> {
        if player == &self.player_x {
            Some(Mark::X)
        } else if player == &self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn player_for(&self, mark: Mark) -> Option<&PlayerId> {
        match mark {
            Mark::X => Some(&self.player_x),
            Mark::O => Some(&self.player_o),
            Mark::Empty => None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        let board = self.board();
        match check_win(board, self.win_condition).and_then(|mark| self.player_for(mark)) {
            Some(winner) => Outcome::Win(winner.clone()),
            None if board.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_over()
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(self.board(), self.win_condition)
    }

    /// The cell filled by move `index` (1-based, matching `history[index]`).
    pub fn move_at(&self, index: usize) -> Option<(Position, Mark)> {
        if index == 0 || index >= self.history.len() {
            return None;
        }
        let after = &self.history[index];
        let pos = *self.history[index - 1].diff(after).first()?;
        Some((pos, after.mark_at(pos.x, pos.y)))
    }

    pub fn last_move(&self) -> Option<(Position, Mark)> {
        self.move_at(self.moves_played())
    }

    /// The same game as it stood after `moves` moves.
    pub fn at_move(&self, moves: usize) -> Option<GameState> {
        if moves >= self.history.len() {
            return None;
        }
        Some(GameState {
            history: self.history[..=moves].to_vec(),
            ..self.clone()
        })
    }
}

impl From<GameState> for GameStateRecord {
    fn from(state: GameState) -> Self {
        Self {
            id: state.id,
            started_at_ms: state.started_at_ms,
            board_size: state.board_size,
            win_condition: state.win_condition,
            player_x: state.player_x,
            player_o: state.player_o,
            history: state.history,
        }
    }
}

impl TryFrom<GameStateRecord> for GameState {
    type Error = GameError;

    fn try_from(record: GameStateRecord) -> Result<Self, Self::Error> {
        GameState::restore(record)
    }
}

fn validate_configuration(
    board_size: usize,
    win_condition: usize,
    player_x: &PlayerId,
    player_o: &PlayerId,
) -> Result<(), GameError> {
    if board_size == 0 {
        return Err(GameError::InvalidConfiguration(
            "board size must be positive".to_string(),
        ));
    }
    if win_condition == 0 || win_condition > board_size {
        return Err(GameError::InvalidConfiguration(format!(
            "win condition ({}) must be between 1 and board size ({})",
            win_condition, board_size
        )));
    }
    if player_x.is_empty() || player_o.is_empty() {
        return Err(GameError::InvalidConfiguration(
            "player names must not be empty".to_string(),
        ));
    }
    if player_x == player_o {
        return Err(GameError::InvalidConfiguration(format!(
            "both players are named {}",
            player_x
        )));
    }
    Ok(())
}

fn validate_history(history: &[Board], board_size: usize, win_condition: usize) -> Result<(), GameError> {
    let Some(first) = history.first() else {
        return Err(GameError::InvalidHistory("history is empty".to_string()));
    };

    if let Some(index) = history.iter().position(|board| board.size() != board_size) {
        return Err(GameError::InvalidHistory(format!(
            "board {} is {}x{}, expected {}x{}",
            index,
            history[index].size(),
            history[index].size(),
            board_size,
            board_size
        )));
    }

    if first.empty_count() != board_size * board_size {
        return Err(GameError::InvalidHistory(
            "first board must be empty".to_string(),
        ));
    }

    for (index, pair) in history.windows(2).enumerate() {
        let (before, after) = (&pair[0], &pair[1]);

        if check_win(before, win_condition).is_some() {
            return Err(GameError::InvalidHistory(format!(
                "move {} was played after the game was won",
                index + 1
            )));
        }

        let changed = before.diff(after);
        let [pos] = changed.as_slice() else {
            return Err(GameError::InvalidHistory(format!(
                "move {} changes {} cells, expected exactly one",
                index + 1,
                changed.len()
            )));
        };

        if before.mark_at(pos.x, pos.y) != Mark::Empty || after.mark_at(pos.x, pos.y) == Mark::Empty {
            return Err(GameError::InvalidHistory(format!(
                "move {} at {} does not fill an empty cell",
                index + 1,
                pos
            )));
        }
    }

    Ok(())
}

/// Builds a game whose current board matches `rows`, placing marks in
/// row-major order. Turn order is not checked, so any position can be set up.
#[cfg(test)]
pub(crate) fn state_from_rows(rows: &[&str], win_condition: usize) -> GameState {
    let target = Board::from_rows(rows).unwrap();
    let mut state = GameState::new(target.size(), win_condition, "pX", "pO").unwrap();
    for y in 0..target.size() {
        for x in 0..target.size() {
            let player = match target.mark_at(x, y) {
                Mark::X => PlayerId::new("pX"),
                Mark::O => PlayerId::new("pO"),
                Mark::Empty => continue,
            };
            state = state.add_move(&player, x, y).unwrap();
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game(size: usize, win: usize) -> GameState {
        GameState::new(size, win, "p1", "p2").unwrap()
    }

    fn p(name: &str) -> PlayerId {
        PlayerId::new(name)
    }

    #[test]
    fn test_new_game_has_single_empty_board() {
        let game = new_game(5, 4);
        assert_eq!(game.history().len(), 1);
        assert_eq!(game.board().empty_count(), 25);
        assert_eq!(game.moves_played(), 0);
        assert_eq!(game.outcome(), Outcome::InProgress);
        assert_eq!(game.current_player(), &p("p1"));
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn test_invalid_configuration() {
        let cases = [
            GameState::new(0, 0, "a", "b"),
            GameState::new(3, 0, "a", "b"),
            GameState::new(3, 4, "a", "b"),
            GameState::new(3, 3, "a", "a"),
            GameState::new(3, 3, "", "b"),
            GameState::new(3, 3, "a", "  "),
        ];
        for result in cases {
            assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn test_one_by_one_board_is_valid() {
        let game = GameState::new(1, 1, "a", "b").unwrap();
        let game = game.add_move(&p("a"), 0, 0).unwrap();
        assert_eq!(game.outcome(), Outcome::Win(p("a")));
    }

    #[test]
    fn test_add_move_appends_snapshot() {
        let game = new_game(3, 3);
        let next = game.add_move(&p("p1"), 1, 2).unwrap();

        assert_eq!(game.history().len(), 1);
        assert_eq!(next.history().len(), 2);
        assert_eq!(next.board().get(1, 2), Some(Mark::X));
        assert_eq!(next.history()[0], game.history()[0]);
        assert_eq!(next.id(), game.id());
        assert_eq!(next.started_at_ms(), game.started_at_ms());
        assert_eq!(next.current_player(), &p("p2"));
        assert_eq!(next.last_move(), Some((Position::new(1, 2), Mark::X)));
    }

    #[test]
    fn test_add_move_uses_players_own_mark() {
        let game = new_game(3, 3).add_move(&p("p2"), 0, 0).unwrap();
        assert_eq!(game.board().get(0, 0), Some(Mark::O));
    }

    #[test]
    fn test_add_move_rejects_unknown_player() {
        let result = new_game(3, 3).add_move(&p("p3"), 0, 0);
        assert_eq!(result, Err(GameError::InvalidPlayer(p("p3"))));
    }

    #[test]
    fn test_add_move_rejects_out_of_bounds() {
        let game = new_game(5, 5);
        assert!(matches!(game.add_move(&p("p1"), 5, 0), Err(GameError::OutOfBounds { x: 5, y: 0, .. })));
        assert!(matches!(game.add_move(&p("p1"), 0, 5), Err(GameError::OutOfBounds { .. })));
        assert!(matches!(game.add_move(&p("p1"), usize::MAX, 2), Err(GameError::OutOfBounds { .. })));
    }

    #[test]
    fn test_add_move_rejects_occupied_cell() {
        let game = new_game(3, 3).add_move(&p("p1"), 1, 1).unwrap();
        assert_eq!(game.add_move(&p("p2"), 1, 1), Err(GameError::CellOccupied { x: 1, y: 1 }));
        assert_eq!(game.add_move(&p("p1"), 1, 1), Err(GameError::CellOccupied { x: 1, y: 1 }));
    }

    #[test]
    fn test_add_move_rejects_moves_after_win() {
        let game = state_from_rows(&["XX.", "OO.", "..."], 3)
            .add_move(&p("pX"), 2, 0)
            .unwrap();
        assert_eq!(game.outcome(), Outcome::Win(p("pX")));
        assert_eq!(game.add_move(&p("pO"), 2, 1), Err(GameError::GameAlreadyOver));
    }

    #[test]
    fn test_draw_when_board_full_without_line() {
        let game = state_from_rows(&["XOX", "XOO", "OXX"], 3);
        assert_eq!(game.outcome(), Outcome::Draw);
        assert!(game.is_over());
        assert_eq!(game.winning_line(), None);
    }

    #[test]
    fn test_win_on_last_cell_is_win_not_draw() {
        let game = state_from_rows(&["XOX", "OXO", "OX."], 3)
            .add_move(&p("pX"), 2, 2)
            .unwrap();
        assert!(game.board().is_full());
        assert_eq!(game.outcome(), Outcome::Win(p("pX")));
    }

    #[test]
    fn test_outcome_is_idempotent() {
        let game = state_from_rows(&["X..", "XX.", "OOO"], 3);
        let before = game.history().to_vec();
        assert_eq!(game.outcome(), Outcome::Win(p("pO")));
        assert_eq!(game.outcome(), Outcome::Win(p("pO")));
        assert_eq!(game.history(), before.as_slice());
    }

    #[test]
    fn test_history_invariant_holds_after_moves() {
        let moves = [(0, 0), (4, 4), (2, 2), (1, 3), (3, 1), (0, 4), (4, 0)];
        let mut game = new_game(5, 5);
        for (i, (x, y)) in moves.into_iter().enumerate() {
            let player = game.current_player().clone();
            game = game.add_move(&player, x, y).unwrap();
            assert_eq!(game.moves_played(), i + 1);
        }

        for pair in game.history().windows(2) {
            let changed = pair[0].diff(&pair[1]);
            assert_eq!(changed.len(), 1);
            let pos = changed[0];
            assert_eq!(pair[0].get(pos.x, pos.y), Some(Mark::Empty));
            assert_ne!(pair[1].get(pos.x, pos.y), Some(Mark::Empty));
        }
    }

    #[test]
    fn test_move_at_walks_history() {
        let game = new_game(3, 3)
            .add_move(&p("p1"), 0, 0)
            .unwrap()
            .add_move(&p("p2"), 2, 1)
            .unwrap();
        assert_eq!(game.move_at(0), None);
        assert_eq!(game.move_at(1), Some((Position::new(0, 0), Mark::X)));
        assert_eq!(game.move_at(2), Some((Position::new(2, 1), Mark::O)));
        assert_eq!(game.move_at(3), None);
    }

    #[test]
    fn test_at_move_truncates_history() {
        let game = state_from_rows(&["XX.", "OO.", "..."], 3)
            .add_move(&p("pX"), 2, 0)
            .unwrap();
        assert!(game.is_over());

        let earlier = game.at_move(2).unwrap();
        assert_eq!(earlier.moves_played(), 2);
        assert_eq!(earlier.outcome(), Outcome::InProgress);
        assert_eq!(earlier.id(), game.id());
        assert_eq!(game.at_move(5).unwrap(), game);
        assert!(game.at_move(6).is_none());
    }

    #[test]
    fn test_restore_accepts_own_record() {
        let game = state_from_rows(&["X.O", ".X.", "..O"], 3);
        let record = GameStateRecord::from(game.clone());
        assert_eq!(GameState::restore(record).unwrap(), game);
    }

    #[test]
    fn test_restore_rejects_broken_histories() {
        let game = state_from_rows(&["X..", "...", "..."], 3);
        let base = GameStateRecord::from(game);

        let mut empty = base.clone();
        empty.history.clear();
        assert!(matches!(GameState::restore(empty), Err(GameError::InvalidHistory(_))));

        let mut two_cells = base.clone();
        two_cells.history.push(Board::from_rows(&["XOO", "...", "..."]).unwrap());
        assert!(matches!(GameState::restore(two_cells), Err(GameError::InvalidHistory(_))));

        let mut erased = base.clone();
        erased.history.push(Board::new(3));
        assert!(matches!(GameState::restore(erased), Err(GameError::InvalidHistory(_))));

        let mut overwritten = base.clone();
        overwritten.history.push(Board::from_rows(&["O..", "...", "..."]).unwrap());
        assert!(matches!(GameState::restore(overwritten), Err(GameError::InvalidHistory(_))));

        let mut wrong_size = base.clone();
        wrong_size.history.push(Board::new(4));
        assert!(matches!(GameState::restore(wrong_size), Err(GameError::InvalidHistory(_))));

        let mut not_empty_start = base.clone();
        not_empty_start.history.remove(0);
        assert!(matches!(GameState::restore(not_empty_start), Err(GameError::InvalidHistory(_))));

        let mut bad_config = base;
        bad_config.win_condition = 9;
        assert!(matches!(GameState::restore(bad_config), Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_restore_rejects_moves_after_win() {
        let mut record = GameStateRecord::from(state_from_rows(&["X..", "...", "..."], 1));
        record.history.push(Board::from_rows(&["XO.", "...", "..."]).unwrap());
        assert!(matches!(GameState::restore(record), Err(GameError::InvalidHistory(_))));
    }

    #[test]
    fn test_yaml_uses_row_strings() {
        let game = state_from_rows(&["X..", ".O.", "..."], 3);
        let yaml = serde_yaml_ng::to_string(&game).unwrap();
        assert!(yaml.contains("X.."));
        assert!(yaml.contains(".O."));

        let restored: GameState = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(restored, game);
    }

    #[test]
    fn test_yaml_with_invalid_history_is_rejected() {
        let yaml = "id: Swift-Fox-000001\nstarted_at_ms: 0\nboard_size: 2\nwin_condition: 2\n\
                    player_x: a\nplayer_o: b\nhistory:\n  - ['..', '..']\n  - ['XO', '..']\n";
        assert!(serde_yaml_ng::from_str::<GameState>(yaml).is_err());
    }
}
