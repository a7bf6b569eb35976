//! Multi-jump resolution.
//!
//! After each capture hop the landing square is re-queried for further
//! captures. If any exist, the same piece must keep jumping and the turn
//! does not pass.

use super::apply::Hop;
use super::movegen::captures_from;
use crate::action::Move;
use crate::position::Position;
use tracing::{debug, instrument};

/// What the mover must do after a hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// The piece on `from` must capture again with one of `captures`.
    Continue {
        /// Square of the jumping piece.
        from: Position,
        /// Captures available from that square.
        captures: Vec<Move>,
    },
    /// The turn passes to the opponent.
    TurnOver,
}

impl Continuation {
    /// Returns true if the turn is over.
    pub fn is_turn_over(&self) -> bool {
        matches!(self, Continuation::TurnOver)
    }
}

/// Decides whether the hop just played must be followed by another capture.
///
/// Simple steps always end the turn. A capture that crowned its man also
/// ends the turn; the new king does not keep jumping.
#[instrument(skip(hop), fields(mv = %hop.mv))]
pub fn resolve(hop: &Hop) -> Continuation {
    if !hop.mv.is_capture() || hop.promoted {
        return Continuation::TurnOver;
    }
    let captures = captures_from(&hop.board, hop.mv.to);
    if captures.is_empty() {
        Continuation::TurnOver
    } else {
        debug!(count = captures.len(), "Further captures available");
        Continuation::Continue {
            from: hop.mv.to,
            captures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::rules::apply_hop;
    use crate::types::{Cell, Side};

    fn board(pieces: &[((u8, u8), Cell)]) -> Board {
        let pieces: Vec<_> = pieces
            .iter()
            .map(|&((r, c), cell)| (Position::at(r, c), cell))
            .collect();
        Board::with_pieces(&pieces).expect("valid fixture")
    }

    #[test]
    fn test_step_ends_turn() {
        let hop = apply_hop(&Board::initial(), Move::between((5, 2), (4, 3)), Side::Red).unwrap();
        assert_eq!(resolve(&hop), Continuation::TurnOver);
    }

    #[test]
    fn test_double_jump_continues() {
        let b = board(&[
            ((6, 1), Cell::RedMan),
            ((5, 2), Cell::BlackMan),
            ((3, 4), Cell::BlackMan),
        ]);
        let hop = apply_hop(&b, Move::between((6, 1), (4, 3)), Side::Red).unwrap();
        assert_eq!(
            resolve(&hop),
            Continuation::Continue {
                from: Position::at(4, 3),
                captures: vec![Move::between((4, 3), (2, 5))],
            }
        );
        let second = apply_hop(&hop.board, Move::between((4, 3), (2, 5)), Side::Red).unwrap();
        assert!(resolve(&second).is_turn_over());
    }

    #[test]
    fn test_promotion_ends_turn() {
        // After crowning on (0,3) a king could jump (1,4) back down, but
        // the turn ends instead.
        let b = board(&[
            ((2, 1), Cell::RedMan),
            ((1, 2), Cell::BlackMan),
            ((1, 4), Cell::BlackMan),
        ]);
        let hop = apply_hop(&b, Move::between((2, 1), (0, 3)), Side::Red).unwrap();
        assert!(hop.promoted);
        assert!(!captures_from(&hop.board, Position::at(0, 3)).is_empty());
        assert_eq!(resolve(&hop), Continuation::TurnOver);
    }
}
