//! Legal move generation.
//!
//! Moves come out in row-major square order, then in the piece's
//! direction order (see [`Cell::directions`]). For a single piece,
//! captures are listed before simple steps.

use crate::action::Move;
use crate::board::Board;
use crate::position::Position;
use crate::types::{Cell, Side};
use tracing::instrument;

/// Capture hops available to the piece at `from`.
///
/// A capture is legal when the adjacent diagonal holds an enemy piece and
/// the square beyond it is on the board and empty.
pub fn captures_from(board: &Board, from: Position) -> Vec<Move> {
    let piece = board.get(from);
    if piece.is_empty() || !from.is_dark() {
        return Vec::new();
    }
    piece
        .directions()
        .iter()
        .filter_map(|&dir| {
            let over = from.offset(dir, 1)?;
            let land = from.offset(dir, 2)?;
            (piece.is_opponent_of(board.get(over)) && board.is_empty_at(land))
                .then(|| Move::new(from, land))
        })
        .collect()
}

/// One-square diagonal steps available to the piece at `from`.
pub fn steps_from(board: &Board, from: Position) -> Vec<Move> {
    let piece = board.get(from);
    if piece.is_empty() || !from.is_dark() {
        return Vec::new();
    }
    piece
        .directions()
        .iter()
        .filter_map(|&dir| {
            let to = from.offset(dir, 1)?;
            board.is_empty_at(to).then(|| Move::new(from, to))
        })
        .collect()
}

/// Legal hops for the piece at `from`; empty if the square is empty.
///
/// With `must_capture`, any available capture suppresses this piece's
/// simple steps. This is the per-piece rule; see
/// [`legal_moves_for_side`] for side-wide precedence.
pub fn legal_moves(board: &Board, from: Position, must_capture: bool) -> Vec<Move> {
    let mut moves = captures_from(board, from);
    if moves.is_empty() || !must_capture {
        moves.extend(steps_from(board, from));
    }
    moves
}

/// Legal hops for every piece owned by `side`.
///
/// With `must_capture`, if any piece of `side` can capture, only captures
/// are returned, across the whole side.
#[instrument(level = "trace", skip(board))]
pub fn legal_moves_for_side(board: &Board, side: Side, must_capture: bool) -> Vec<Move> {
    if must_capture {
        let captures: Vec<Move> = board
            .pieces(side)
            .flat_map(|(pos, _)| captures_from(board, pos))
            .collect();
        if !captures.is_empty() {
            return captures;
        }
    }
    board
        .pieces(side)
        .flat_map(|(pos, _)| legal_moves(board, pos, must_capture))
        .collect()
}

/// Returns true if any piece of `side` can capture.
pub fn has_capture(board: &Board, side: Side) -> bool {
    board
        .pieces(side)
        .any(|(pos, _)| !captures_from(board, pos).is_empty())
}

/// Returns true if `side` has at least one legal hop.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    // Any capture is legal whether or not capture is mandatory, so
    // checking both kinds per piece is enough.
    board.pieces(side).any(|(pos, _)| {
        !captures_from(board, pos).is_empty() || !steps_from(board, pos).is_empty()
    })
}

/// Number of legal hops for `side`, used for mobility scoring.
pub fn mobility(board: &Board, side: Side, must_capture: bool) -> usize {
    legal_moves_for_side(board, side, must_capture).len()
}

/// Returns true if `cell` is a man standing on its promotion row.
pub(crate) fn reached_back_rank(cell: Cell, at: Position) -> bool {
    cell.side()
        .is_some_and(|side| cell.is_man() && at.row() == side.promotion_row())
}
