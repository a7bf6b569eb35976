//! Game rules for checkers.
//!
//! Pure functions over [`Board`](crate::Board) values: move generation,
//! hop application, multi-jump resolution and terminal detection. Rules
//! are separated from board storage so the search engine and the session
//! compose them the same way.

pub mod apply;
pub mod jumps;
pub mod movegen;
pub mod outcome;

pub use apply::{ApplyError, Hop, apply, apply_hop};
pub use jumps::{Continuation, resolve};
pub use movegen::{
    captures_from, has_capture, has_legal_move, legal_moves, legal_moves_for_side, mobility,
    steps_from,
};
pub use outcome::{DrawReason, Outcome, WinReason, check_outcome};
