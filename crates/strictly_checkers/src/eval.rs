//! Static evaluation.
//!
//! Scores are from red's point of view: positive favors red, negative
//! favors black.

use crate::board::Board;
use crate::rules::mobility;
use crate::types::Side;

/// Material value of a man.
pub const MAN_VALUE: f64 = 1.0;
/// Material value of a king.
pub const KING_VALUE: f64 = 1.5;
/// Weight of one move of mobility difference.
pub const MOBILITY_WEIGHT: f64 = 0.1;

/// Material plus mobility, positive favoring red.
///
/// Material counts men at [`MAN_VALUE`] and kings at [`KING_VALUE`].
/// Mobility is red's legal-move count minus black's (mandatory capture
/// applied), scaled by [`MOBILITY_WEIGHT`].
pub fn evaluate(board: &Board) -> f64 {
    let material = material(board, Side::Red) - material(board, Side::Black);
    let moves = mobility(board, Side::Red, true) as f64 - mobility(board, Side::Black, true) as f64;
    material + MOBILITY_WEIGHT * moves
}

/// [`evaluate`] seen from `side`: positive favors `side`.
pub fn evaluate_for(board: &Board, side: Side) -> f64 {
    match side {
        Side::Red => evaluate(board),
        Side::Black => -evaluate(board),
    }
}

/// Total material owned by `side`.
pub fn material(board: &Board, side: Side) -> f64 {
    board.pieces(side).map(|(_, cell)| cell.material()).sum()
}
