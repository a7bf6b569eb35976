//! Move application: board + hop + mover → new board.

use super::movegen::reached_back_rank;
use crate::action::Move;
use crate::board::Board;
use crate::position::Position;
use crate::types::{Cell, Side};
use derive_more::Display;
use tracing::{error, instrument, warn};

/// Reasons the applicator refuses a hop.
///
/// These indicate a caller bypassed the move generator; the original
/// board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ApplyError {
    /// No piece on the starting square.
    #[display("No piece at {}", _0)]
    EmptySource(Position),

    /// The piece does not belong to the mover.
    #[display("Piece at {} belongs to {}, not {}", at, owner, mover)]
    WrongOwner {
        /// Starting square.
        at: Position,
        /// Actual owner.
        owner: Side,
        /// Side that tried to move it.
        mover: Side,
    },

    /// A capture would remove one of the mover's own pieces.
    #[display("{} cannot capture own piece at {}", mover, at)]
    SelfCapture {
        /// Jumped square.
        at: Position,
        /// Side that tried to capture.
        mover: Side,
    },

    /// The hop is not a one- or two-square diagonal.
    #[display("{} is not a diagonal hop", _0)]
    NotDiagonal(Move),
}

impl std::error::Error for ApplyError {}

/// Everything that happened during one hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    /// The board after the hop.
    pub board: Board,
    /// The hop that was applied.
    pub mv: Move,
    /// The piece removed by a capture, and where it stood.
    pub captured: Option<(Position, Cell)>,
    /// Whether the moving man was crowned.
    pub promoted: bool,
}

/// Applies one hop for `mover`, reporting capture and promotion.
///
/// The piece relocates; a two-row hop removes the jumped piece; a man
/// landing on its far row is crowned in the same step.
///
/// # Errors
///
/// Rejects hops that move an empty square or an enemy piece, that jump the
/// mover's own piece, or that are not diagonal. Legality beyond that
/// (direction, occupancy, mandatory capture) is the generator's job; saved
/// matches are replayed through here without it.
#[instrument(level = "trace", skip_all, fields(mv = %mv, mover = %mover))]
pub fn apply_hop(board: &Board, mv: Move, mover: Side) -> Result<Hop, ApplyError> {
    let piece = board.get(mv.from);
    let owner = piece.side().ok_or_else(|| {
        error!("Attempted to move from an empty square");
        ApplyError::EmptySource(mv.from)
    })?;
    if owner != mover {
        error!(%owner, "Attempted to move an enemy piece");
        return Err(ApplyError::WrongOwner {
            at: mv.from,
            owner,
            mover,
        });
    }
    if !mv.is_diagonal_hop() {
        error!("Attempted a non-diagonal hop");
        return Err(ApplyError::NotDiagonal(mv));
    }
    if !board.is_empty_at(mv.to) {
        warn!(at = %mv.to, "Landing square occupied, overwriting");
    }

    let mut next = *board;
    let mut captured = None;
    if let Some(over) = mv.jumped() {
        let victim = next.get(over);
        if victim.belongs_to(mover) {
            error!(at = %over, "Attempted to capture own piece");
            return Err(ApplyError::SelfCapture { at: over, mover });
        }
        if victim.is_empty() {
            warn!(at = %over, "Jump over an empty square");
        } else {
            captured = Some((over, victim));
        }
        next.set(over, Cell::Empty);
    }

    let promoted = reached_back_rank(piece, mv.to);
    next.set(mv.from, Cell::Empty);
    next.set(mv.to, if promoted { piece.promoted() } else { piece });

    Ok(Hop {
        board: next,
        mv,
        captured,
        promoted,
    })
}

/// Applies one hop for `mover` and returns the new board.
///
/// See [`apply_hop`] for the failure cases; on error the caller still
/// holds the original, unchanged board.
pub fn apply(board: &Board, mv: Move, mover: Side) -> Result<Board, ApplyError> {
    apply_hop(board, mv, mover).map(|hop| hop.board)
}
