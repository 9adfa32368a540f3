use xo_engine::games::tictactoe::{Board, GameState, Outcome, Position};

/// Board with column numbers on top and row numbers on the left.
pub fn render_board(board: &Board) -> String {
    let width = board.size().saturating_sub(1).to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(width));
    for x in 0..board.size() {
        out.push_str(&format!(" {:>width$}", x, width = width));
    }
    out.push('\n');

    for (y, row) in board.rows().iter().enumerate() {
        out.push_str(&format!("{:>width$}", y, width = width));
        for mark in row {
            out.push_str(&format!(" {:>width$}", mark.symbol(), width = width));
        }
        out.push('\n');
    }
    out
}

pub fn describe_outcome(state: &GameState) -> String {
    match state.outcome() {
        Outcome::InProgress => format!("{} to move", state.current_player()),
        Outcome::Draw => "Draw".to_string(),
        Outcome::Win(player) => match state.winning_line() {
            Some(line) => format!("{} wins with {} from {} to {}", player, line.mark, line.start, line.end),
            None => format!("{} wins", player),
        },
    }
}

/// Parses "x y" (column then row); commas are accepted as separators.
pub fn parse_move(input: &str) -> Result<Position, String> {
    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();

    let [x, y] = parts.as_slice() else {
        return Err(format!("expected two numbers \"x y\", got {:?}", input.trim()));
    };
    let x = x.parse::<usize>().map_err(|_| format!("invalid column: {}", x))?;
    let y = y.parse::<usize>().map_err(|_| format!("invalid row: {}", y))?;
    Ok(Position::new(x, y))
}
