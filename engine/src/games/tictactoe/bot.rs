use std::time::Instant;

use crate::games::SessionRng;
use crate::log;
use crate::PlayerId;
use super::board::Board;
use super::error::{BotError, GameError};
use super::game_state::GameState;
use super::move_generator::{SMALL_BOARD_SIZE, candidate_moves};
use super::types::{Mark, Position};
use super::win_detector::check_win_at;

/// Enough plies to search a 3x3 board to the end.
const SMALL_BOARD_DEPTH_LIMIT: usize = 9;

/// Opponent extends an open three on ply 2 and wins on ply 4.
const MIN_DEPTH_LIMIT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Evaluation {
    score: i32,
    /// Plies from the root to the position that produced `score`.
    plies: usize,
}

/// Picks a move for `bot` and returns the game with that move applied.
pub fn choose_move(state: &GameState, bot: &PlayerId) -> Result<GameState, BotError> {
    let mut rng = SessionRng::from_random();
    choose_move_with_rng(state, bot, &mut rng)
}

/// Like [`choose_move`], with candidate ordering drawn from `rng`. Equal
/// seeds give equal moves.
pub fn choose_move_with_rng(
    state: &GameState,
    bot: &PlayerId,
    rng: &mut SessionRng,
) -> Result<GameState, BotError> {
    let bot_mark = state
        .mark_of(bot)
        .ok_or_else(|| BotError::InvalidBotIdentity(bot.clone()))?;

    let board = state.board();
    if board.is_full() {
        return Err(BotError::NoLegalMoves);
    }
    if state.is_over() {
        return Err(BotError::Game(GameError::GameAlreadyOver));
    }

    let started = Instant::now();
    let depth_limit = calculate_depth_limit(board.size(), board.empty_count());
    let mut search = Search::new(board, state.win_condition(), bot_mark, depth_limit, rng);

    let (pos, evaluation) = search.best_move().ok_or(BotError::NoLegalMoves)?;

    log!(
        "[game:{}] Bot {} ({}) plays {} score {} in {} plies (depth limit {}, {} nodes, {:?})",
        state.id(),
        bot,
        bot_mark,
        pos,
        evaluation.score,
        evaluation.plies,
        depth_limit,
        search.nodes,
        started.elapsed()
    );

    Ok(state.add_move(bot, pos.x, pos.y)?)
}

/// How many plies the search may look ahead.
///
/// Small boards are searched to the end. Larger boards get at least four
/// plies, enough to see an open three turn into a win. The limit grows as the
/// board fills up and the tree narrows, but wide boards stay shallower since
/// every ply has more neighbouring cells to try.
pub fn calculate_depth_limit(board_size: usize, empty_cells: usize) -> usize {
    if board_size <= SMALL_BOARD_SIZE {
        return SMALL_BOARD_DEPTH_LIMIT;
    }

    let by_empty_cells = match empty_cells {
        0..=6 => empty_cells,
        7..=10 => 6,
        11..=20 => 5,
        _ => MIN_DEPTH_LIMIT,
    };
    let by_board_size = match board_size {
        0..=7 => 6,
        8..=12 => 5,
        _ => MIN_DEPTH_LIMIT,
    };

    by_empty_cells.min(by_board_size).max(1)
}

struct Search<'a> {
    board: Board,
    win_count: usize,
    bot_mark: Mark,
    opponent_mark: Mark,
    depth_limit: usize,
    /// Score of a win on the first ply; later wins score less.
    win_score: i32,
    rng: &'a mut SessionRng,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(
        board: &Board,
        win_count: usize,
        bot_mark: Mark,
        depth_limit: usize,
        rng: &'a mut SessionRng,
    ) -> Self {
        let max_moves = board.size() * board.size();
        Self {
            board: board.clone(),
            win_count,
            bot_mark,
            opponent_mark: bot_mark.opponent().unwrap_or(Mark::O),
            depth_limit,
            win_score: max_moves as i32 + 1,
            rng,
            nodes: 0,
        }
    }

    /// Every root candidate gets a full-window search so scores are exact and
    /// ties can be broken on plies.
    fn best_move(&mut self) -> Option<(Position, Evaluation)> {
        let candidates = candidate_moves(&self.board, self.rng);
        let mut best: Option<(Position, Evaluation)> = None;

        for pos in candidates {
            self.board.set(pos.x, pos.y, self.bot_mark);
            let evaluation = self.minimax(1, false, i32::MIN, i32::MAX, pos);
            self.board.set(pos.x, pos.y, Mark::Empty);

            let is_better = match best {
                None => true,
                Some((_, current)) => {
                    evaluation.score > current.score
                        || (evaluation.score == current.score && evaluation.plies < current.plies)
                }
            };
            if is_better {
                best = Some((pos, evaluation));
            }
        }

        best
    }

    fn minimax(
        &mut self,
        depth: usize,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        last: Position,
    ) -> Evaluation {
        self.nodes += 1;

        if let Some(winner) = check_win_at(&self.board, self.win_count, last) {
            let score = self.win_score - depth as i32;
            return Evaluation {
                score: if winner == self.bot_mark { score } else { -score },
                plies: depth,
            };
        }

        if self.board.is_full() || depth >= self.depth_limit {
            return Evaluation { score: 0, plies: depth };
        }

        let mark = if is_maximizing { self.bot_mark } else { self.opponent_mark };
        let moves = candidate_moves(&self.board, self.rng);

        let mut best = Evaluation {
            score: if is_maximizing { i32::MIN } else { i32::MAX },
            plies: depth,
        };

        for pos in moves {
            self.board.set(pos.x, pos.y, mark);
            let evaluation = self.minimax(depth + 1, !is_maximizing, alpha, beta, pos);
            self.board.set(pos.x, pos.y, Mark::Empty);

            if is_maximizing {
                if evaluation.score > best.score {
                    best = evaluation;
                }
                alpha = alpha.max(evaluation.score);
                if best.score >= beta {
                    break;
                }
            } else {
                if evaluation.score < best.score {
                    best = evaluation;
                }
                beta = beta.min(evaluation.score);
                if best.score <= alpha {
                    break;
                }
            }
        }

        best
    }
}
