use super::board::Board;
use super::types::{Mark, Position, WinningLine};

const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

pub fn check_win(board: &Board, win_count: usize) -> Option<Mark> {
    check_win_with_line(board, win_count).map(|line| line.mark)
}

/// Scans every cell as the start of a run going right, down, down-right and
/// down-left. Returns the first complete run in row-major scan order.
pub fn check_win_with_line(board: &Board, win_count: usize) -> Option<WinningLine> {
    if win_count == 0 {
        return None;
    }
    let size = board.size();
    let last = win_count - 1;

    for y in 0..size {
        for x in 0..size {
            let mark = board.mark_at(x, y);
            if mark == Mark::Empty {
                continue;
            }

            let start = Position::new(x, y);
            if check_horizontal(board, x, y, mark, win_count) {
                return Some(WinningLine::new(mark, start, Position::new(x + last, y)));
            }
            if check_vertical(board, x, y, mark, win_count) {
                return Some(WinningLine::new(mark, start, Position::new(x, y + last)));
            }
            if check_diagonal_down_right(board, x, y, mark, win_count) {
                return Some(WinningLine::new(mark, start, Position::new(x + last, y + last)));
            }
            if check_diagonal_down_left(board, x, y, mark, win_count) {
                return Some(WinningLine::new(mark, start, Position::new(x - last, y + last)));
            }
        }
    }

    None
}

fn check_horizontal(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    if x + win_count > board.size() {
        return false;
    }
    (0..win_count).all(|i| board.mark_at(x + i, y) == mark)
}

fn check_vertical(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    if y + win_count > board.size() {
        return false;
    }
    (0..win_count).all(|i| board.mark_at(x, y + i) == mark)
}

fn check_diagonal_down_right(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    let size = board.size();
    if x + win_count > size || y + win_count > size {
        return false;
    }
    (0..win_count).all(|i| board.mark_at(x + i, y + i) == mark)
}

fn check_diagonal_down_left(board: &Board, x: usize, y: usize, mark: Mark, win_count: usize) -> bool {
    if x + 1 < win_count || y + win_count > board.size() {
        return false;
    }
    (0..win_count).all(|i| board.mark_at(x - i, y + i) == mark)
}

/// Incremental form used during search: only lines through `pos` are
/// examined, so it finds a win only if the mark at `pos` completed one.
pub fn check_win_at(board: &Board, win_count: usize, pos: Position) -> Option<Mark> {
    let mark = board.get(pos.x, pos.y)?;
    if mark == Mark::Empty || win_count == 0 {
        return None;
    }

    for (dx, dy) in DIRECTIONS {
        let count = 1
            + count_in_direction(board, pos, dx, dy, mark, win_count)
            + count_in_direction(board, pos, -dx, -dy, mark, win_count);
        if count >= win_count {
            return Some(mark);
        }
    }

    None
}

fn count_in_direction(
    board: &Board,
    pos: Position,
    dx: isize,
    dy: isize,
    mark: Mark,
    win_count: usize,
) -> usize {
    let mut count = 0;
    let (mut x, mut y) = (pos.x, pos.y);
    while count + 1 < win_count {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            break;
        };
        if board.get(nx, ny) != Some(mark) {
            break;
        }
        count += 1;
        x = nx;
        y = ny;
    }
    count
}
