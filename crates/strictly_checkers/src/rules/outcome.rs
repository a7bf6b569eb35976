//! Terminal-position detection.
//!
//! In checkers a side that cannot move loses; it is not a stalemate.

use super::movegen::has_legal_move;
use crate::board::Board;
use crate::types::Side;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Why a game was won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum WinReason {
    /// The loser has no pieces left.
    NoPieces,
    /// The loser has pieces but no legal move on its turn.
    NoMoves,
}

/// Why a game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum DrawReason {
    /// The configured turn cap was reached.
    TurnLimit,
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// One side won.
    Winner {
        /// The winning side.
        side: Side,
        /// How the game was decided.
        reason: WinReason,
    },
    /// The game was drawn.
    Draw(DrawReason),
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Winner { side, .. } => Some(*side),
            Outcome::Draw(_) => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw(_))
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner { side, reason } => {
                let why = match reason {
                    WinReason::NoPieces => "opponent has no pieces",
                    WinReason::NoMoves => "opponent cannot move",
                };
                write!(f, "{} wins ({})", side, why)
            }
            Outcome::Draw(DrawReason::TurnLimit) => write!(f, "Draw (turn limit reached)"),
        }
    }
}

/// Checks whether the game is over with `to_move` about to move.
///
/// - `to_move` has no pieces: the opponent wins.
/// - The opponent has no pieces: `to_move` wins.
/// - `to_move` has pieces but no legal move: the opponent wins.
/// - Otherwise the game goes on (`None`).
///
/// Mandatory capture never removes every option (it only filters steps
/// when a capture exists), so it does not affect this check.
#[instrument(skip(board))]
pub fn check_outcome(board: &Board, to_move: Side) -> Option<Outcome> {
    if board.count(to_move) == 0 {
        return Some(Outcome::Winner {
            side: to_move.opponent(),
            reason: WinReason::NoPieces,
        });
    }
    if board.count(to_move.opponent()) == 0 {
        return Some(Outcome::Winner {
            side: to_move,
            reason: WinReason::NoPieces,
        });
    }
    if !has_legal_move(board, to_move) {
        return Some(Outcome::Winner {
            side: to_move.opponent(),
            reason: WinReason::NoMoves,
        });
    }
    None
}
