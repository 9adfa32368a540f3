use crate::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidConfiguration(String),
    InvalidPlayer(PlayerId),
    OutOfBounds { x: usize, y: usize, board_size: usize },
    CellOccupied { x: usize, y: usize },
    GameAlreadyOver,
    InvalidBoard(String),
    InvalidHistory(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidConfiguration(reason) => write!(f, "Invalid game configuration: {}", reason),
            GameError::InvalidPlayer(player) => write!(f, "Player {} is not in this game", player),
            GameError::OutOfBounds { x, y, board_size } => {
                write!(f, "Position ({}, {}) is outside the {}x{} board", x, y, board_size, board_size)
            }
            GameError::CellOccupied { x, y } => write!(f, "Cell ({}, {}) is already marked", x, y),
            GameError::GameAlreadyOver => write!(f, "Game is already over"),
            GameError::InvalidBoard(reason) => write!(f, "Invalid board: {}", reason),
            GameError::InvalidHistory(reason) => write!(f, "Invalid move history: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}

/// Bot failures mean the caller broke an invariant (asked the wrong side to
/// move, or asked for a move on a finished game).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotError {
    InvalidBotIdentity(PlayerId),
    NoLegalMoves,
    Game(GameError),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::InvalidBotIdentity(player) => {
                write!(f, "Bot identity {} matches neither player", player)
            }
            BotError::NoLegalMoves => write!(f, "No empty cells left for the bot"),
            BotError::Game(e) => write!(f, "Bot move rejected: {}", e),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::Game(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GameError> for BotError {
    fn from(e: GameError) -> Self {
        BotError::Game(e)
    }
}
