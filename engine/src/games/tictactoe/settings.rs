use serde::{Deserialize, Serialize};

use crate::config::Validate;

/// Largest board the front ends offer; the engine itself accepts any size.
pub const MAX_BOARD_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub board_size: usize,
    pub win_condition: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            board_size: 3,
            win_condition: 3,
        }
    }
}

impl Validate for GameSettings {
    fn validate(&self) -> Result<(), String> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(format!("board_size must be between 1 and {}", MAX_BOARD_SIZE));
        }
        if self.win_condition == 0 || self.win_condition > self.board_size {
            return Err(format!(
                "win_condition ({}) must be between 1 and board_size ({})",
                self.win_condition, self.board_size
            ));
        }
        Ok(())
    }
}
