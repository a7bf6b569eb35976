//! First-class action types for checkers.
//!
//! A [`Move`] is a single hop: one diagonal step or one capture jump.
//! Multi-jumps are sequences of hops, never a single aggregate move.

use crate::position::Position;
use crate::rules::ApplyError;
use crate::search::SearchError;
use crate::session::GameStatus;
use crate::types::Side;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hop from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// Starting square.
    pub from: Position,
    /// Landing square.
    pub to: Position,
}

impl Move {
    /// Builds a move from literal coordinates.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is off the board.
    pub const fn between(from: (u8, u8), to: (u8, u8)) -> Self {
        Self {
            from: Position::at(from.0, from.1),
            to: Position::at(to.0, to.1),
        }
    }

    /// Absolute row distance of the hop.
    pub fn row_distance(&self) -> u8 {
        self.from.row().abs_diff(self.to.row())
    }

    /// Returns true if this hop jumps over a square.
    pub fn is_capture(&self) -> bool {
        self.row_distance() == 2
    }

    /// The jumped-over square, for captures.
    pub fn jumped(&self) -> Option<Position> {
        self.is_capture().then(|| self.from.midpoint(self.to))
    }

    /// Returns true if the hop is a one- or two-square diagonal.
    pub fn is_diagonal_hop(&self) -> bool {
        let dr = self.row_distance();
        let dc = self.from.col().abs_diff(self.to.col());
        dr == dc && (dr == 1 || dr == 2)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// A hop as recorded in the session's append-only log.
///
/// Records are for display and saving only; no rule reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct MoveRecord {
    /// Side that moved.
    pub side: Side,
    /// The hop played.
    pub mv: Move,
    /// When the hop was accepted.
    pub timestamp: DateTime<Utc>,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.side.letter(), self.mv)
    }
}

/// Error that can occur when requesting a move from a session.
///
/// Every variant leaves the session unchanged.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum MoveError {
    /// The game is not accepting moves.
    #[display("Game is not active (status: {:?})", _0)]
    GameNotActive(GameStatus),

    /// There is no piece on the starting square.
    #[display("No piece at {}", _0)]
    EmptySquare(Position),

    /// The piece belongs to the other side.
    #[display("Piece at {} belongs to {}, but it is {}'s turn", at, owner, to_move)]
    NotYourPiece {
        /// Square of the piece.
        at: Position,
        /// Owner of the piece.
        owner: Side,
        /// Side to move.
        to_move: Side,
    },

    /// The hop is not among the legal moves.
    #[display("Illegal move {}", _0)]
    IllegalMove(Move),

    /// A multi-jump is in progress; only the jumping piece may move.
    #[display("Capture must continue from {}", _0)]
    ContinuationRequired(Position),

    /// Skip was requested but no multi-jump is in progress.
    #[display("No capture sequence to skip")]
    NoContinuation,

    /// The side to move has no legal moves.
    #[display("{} has no legal moves", _0)]
    NoLegalMoves(Side),

    /// The engine was asked to move for a human side.
    #[display("{} is not played by the engine", _0)]
    NotEngineTurn(Side),

    /// The applicator rejected the hop.
    #[display("{}", _0)]
    Apply(ApplyError),

    /// The search engine rejected its parameters.
    #[display("{}", _0)]
    Search(SearchError),
}

impl std::error::Error for MoveError {}

impl From<ApplyError> for MoveError {
    fn from(err: ApplyError) -> Self {
        MoveError::Apply(err)
    }
}

impl From<SearchError> for MoveError {
    fn from(err: SearchError) -> Self {
        MoveError::Search(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_detection() {
        let step = Move::between((6, 1), (5, 0));
        let jump = Move::between((4, 1), (2, 3));
        assert!(!step.is_capture());
        assert!(jump.is_capture());
        assert_eq!(step.jumped(), None);
        assert_eq!(jump.jumped(), Some(Position::at(3, 2)));
    }

    #[test]
    fn test_diagonal_hop_shape() {
        assert!(Move::between((6, 1), (5, 0)).is_diagonal_hop());
        assert!(Move::between((4, 1), (2, 3)).is_diagonal_hop());
        assert!(!Move::between((4, 1), (4, 3)).is_diagonal_hop());
        assert!(!Move::between((7, 0), (4, 3)).is_diagonal_hop());
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::between((2, 3), (4, 1)).to_string(), "(2,3)->(4,1)");
    }
}
