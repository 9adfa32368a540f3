use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::types::{Mark, Position};

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Square grid indexed as `cells[y][x]`.
///
/// Serialized as one string per row using `X`, `O` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Board {
    size: usize,
    cells: Vec<Vec<Mark>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![Mark::Empty; size]; size],
        }
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GameError> {
        let size = rows.len();
        if size == 0 {
            return Err(GameError::InvalidBoard("board has no rows".to_string()));
        }

        let mut cells = Vec::with_capacity(size);
        for (y, row) in rows.iter().enumerate() {
            let parsed: Vec<Mark> = row
                .as_ref()
                .chars()
                .map(|symbol| {
                    Mark::from_symbol(symbol).ok_or_else(|| {
                        GameError::InvalidBoard(format!("unknown cell symbol '{}' in row {}", symbol, y))
                    })
                })
                .collect::<Result<_, _>>()?;

            if parsed.len() != size {
                return Err(GameError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    parsed.len(),
                    size
                )));
            }
            cells.push(parsed);
        }

        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Mark> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Caller guarantees `(x, y)` is on the board.
    pub(crate) fn mark_at(&self, x: usize, y: usize) -> Mark {
        self.cells[y][x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, mark: Mark) {
        self.cells[y][x] = mark;
    }

    pub fn rows(&self) -> &[Vec<Mark>] {
        &self.cells
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(Mark::symbol).collect())
            .collect()
    }

    pub fn available_moves(&self) -> Vec<Position> {
        let mut moves = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == Mark::Empty {
                    moves.push(Position::new(x, y));
                }
            }
        }
        moves
    }

    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == Mark::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Mark::Empty))
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }

    pub fn has_occupied_neighbor(&self, x: usize, y: usize) -> bool {
        NEIGHBOR_OFFSETS.iter().any(|&(dx, dy)| {
            match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
                (Some(nx), Some(ny)) => matches!(self.get(nx, ny), Some(Mark::X | Mark::O)),
                _ => false,
            }
        })
    }

    /// Cells whose contents differ between two boards of equal size.
    pub fn diff(&self, other: &Board) -> Vec<Position> {
        let mut changed = Vec::new();
        for y in 0..self.size.min(other.size) {
            for x in 0..self.size.min(other.size) {
                if self.cells[y][x] != other.cells[y][x] {
                    changed.push(Position::new(x, y));
                }
            }
        }
        changed
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl From<Board> for Vec<String> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl TryFrom<Vec<String>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Board::from_rows(&rows)
    }
}
