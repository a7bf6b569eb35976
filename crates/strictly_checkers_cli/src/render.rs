//! Plain-text board printing with coordinates.

use strictly_checkers::{BOARD_SIZE, Board, GameSession, GameStatus, Position};

/// Renders the board with row and column indices.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   ");
    for col in 0..BOARD_SIZE {
        out.push_str(&format!(" {}", col));
    }
    out.push('\n');
    for (row, cells) in board.rows().iter().enumerate() {
        out.push_str(&format!("{}  ", row));
        for (col, cell) in cells.iter().enumerate() {
            let dark = Position::new(row as u8, col as u8).is_some_and(Position::is_dark);
            out.push(' ');
            out.push(if dark { cell.symbol() } else { ' ' });
        }
        out.push('\n');
    }
    out
}

/// One-line status summary for the prompt.
pub fn status_line(session: &GameSession) -> String {
    match session.status() {
        GameStatus::Completed | GameStatus::Drawn => match session.outcome() {
            Some(outcome) => format!("Game over: {}", outcome),
            None => format!("Game over ({})", session.status()),
        },
        status => {
            let mut line = format!(
                "Turn {} | {} to move | {}",
                session.turn_number(),
                session.to_move(),
                status
            );
            if let Some(from) = session.pending_continuation() {
                line.push_str(&format!(" | must keep jumping from {}", from));
            }
            line
        }
    }
}
