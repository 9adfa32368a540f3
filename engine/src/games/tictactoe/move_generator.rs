use crate::games::SessionRng;
use super::board::Board;
use super::types::Position;

/// Boards up to this size are searched over every empty cell.
pub const SMALL_BOARD_SIZE: usize = 3;

/// Cells the search should branch on for this position, in random order.
///
/// This only narrows the search; legality of a move is decided by the cell
/// being empty. On boards larger than [`SMALL_BOARD_SIZE`] only cells touching
/// an existing mark (8-neighbourhood) are kept. With no marks to touch, a
/// single random empty cell is returned.
pub fn candidate_moves(board: &Board, rng: &mut SessionRng) -> Vec<Position> {
    let available = board.available_moves();

    let mut candidates = if board.size() <= SMALL_BOARD_SIZE {
        available
    } else {
        let near: Vec<Position> = available
            .iter()
            .copied()
            .filter(|pos| board.has_occupied_neighbor(pos.x, pos.y))
            .collect();

        if near.is_empty() {
            rng.choose(&available).copied().into_iter().collect()
        } else {
            near
        }
    };

    rng.shuffle(&mut candidates);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;
    use std::collections::HashSet;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_small_board_returns_every_empty_cell() {
        let b = board(&["X..", "...", "..O"]);
        let mut rng = SessionRng::new(1);
        let moves: HashSet<Position> = candidate_moves(&b, &mut rng).into_iter().collect();
        let expected: HashSet<Position> = b.available_moves().into_iter().collect();
        assert_eq!(moves, expected);
        assert_eq!(moves.len(), 7);
    }

    #[test]
    fn test_small_empty_board_returns_all_cells() {
        let mut rng = SessionRng::new(1);
        assert_eq!(candidate_moves(&Board::new(3), &mut rng).len(), 9);
    }

    #[test]
    fn test_large_board_keeps_only_neighbours() {
        let b = board(&["X....", ".....", ".....", ".....", "....."]);
        let mut rng = SessionRng::new(5);
        let moves: HashSet<Position> = candidate_moves(&b, &mut rng).into_iter().collect();
        let expected: HashSet<Position> =
            [Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)].into_iter().collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_large_board_neighbours_of_several_marks() {
        let b = board(&["......", ".X....", "......", "......", "....O.", "......"]);
        let mut rng = SessionRng::new(9);
        let moves = candidate_moves(&b, &mut rng);
        assert_eq!(moves.len(), 16);
        for pos in moves {
            assert_eq!(b.get(pos.x, pos.y), Some(Mark::Empty));
            assert!(b.has_occupied_neighbor(pos.x, pos.y));
        }
    }

    #[test]
    fn test_empty_large_board_yields_one_candidate() {
        let b = Board::new(7);
        let mut rng = SessionRng::new(3);
        let moves = candidate_moves(&b, &mut rng);
        assert_eq!(moves.len(), 1);
        assert!(b.contains(moves[0].x, moves[0].y));
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let b = board(&["XOXO", "OXOX", "XOXO", "OXOX"]);
        let mut rng = SessionRng::new(3);
        assert!(candidate_moves(&b, &mut rng).is_empty());
    }

    #[test]
    fn test_order_is_shuffled() {
        let b = Board::new(3);
        let mut rng = SessionRng::new(11);
        let orders: HashSet<Vec<Position>> = (0..20).map(|_| candidate_moves(&b, &mut rng)).collect();
        assert!(orders.len() > 1);
    }
}
