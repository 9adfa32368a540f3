mod board;
mod bot;
mod error;
mod game_state;
mod move_generator;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot::{calculate_depth_limit, choose_move, choose_move_with_rng};
pub use error::{BotError, GameError};
pub use game_state::{GameState, GameStateRecord};
pub use move_generator::candidate_moves;
pub use settings::{GameSettings, MAX_BOARD_SIZE};
pub use types::{Mark, Outcome, Position, WinningLine};
pub use win_detector::{check_win, check_win_at, check_win_with_line};
