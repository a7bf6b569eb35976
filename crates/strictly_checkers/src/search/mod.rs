//! Adversarial search: depth-bounded minimax with alpha-beta pruning.
//!
//! Scores returned by the search are from the maximizing side's point
//! of view. Sides alternate at every ply.

mod minimax;
mod parallel;

pub use minimax::Searcher;

use crate::action::Move;
use crate::board::Board;
use crate::types::Side;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Deepest search accepted at the boundary.
pub const MAX_SEARCH_DEPTH: i32 = 10;

/// Depth used when none is configured.
pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

/// Base score for a side that has no legal move.
///
/// The remaining depth is added so that quicker wins score higher.
pub const WIN_SCORE: f64 = 1000.0;

/// Rejected search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SearchError {
    /// Depth below zero.
    #[display("Search depth {} is negative", _0)]
    NegativeDepth(i32),
    /// Depth above [`MAX_SEARCH_DEPTH`].
    #[display("Search depth {} exceeds the maximum of {}", _0, MAX_SEARCH_DEPTH)]
    DepthTooLarge(i32),
    /// Depth zero where a move must be chosen.
    #[display("Choosing a move needs a search depth of at least 1")]
    ZeroDepth,
}

impl std::error::Error for SearchError {}

/// Validates a requested depth.
pub fn check_depth(depth: i32) -> Result<u32, SearchError> {
    if depth < 0 {
        Err(SearchError::NegativeDepth(depth))
    } else if depth > MAX_SEARCH_DEPTH {
        Err(SearchError::DepthTooLarge(depth))
    } else {
        Ok(depth.unsigned_abs())
    }
}

/// Knobs that shape a search without changing its recursive contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct SearchLimits {
    /// Apply side-wide mandatory capture when generating moves.
    pub must_capture: bool,
    /// Stop expanding once this many nodes have been visited.
    pub node_budget: Option<u64>,
    /// Search root moves on the rayon pool.
    pub parallel: bool,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            must_capture: true,
            node_budget: None,
            parallel: false,
        }
    }
}

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Score from the searching side's point of view.
    pub score: f64,
    /// Best hop, or `None` when the side has no move or depth is zero.
    pub best_move: Option<Move>,
    /// Nodes visited.
    pub nodes: u64,
}

/// Minimax with alpha-beta pruning, using default limits.
///
/// Returns `(score, best_move)` where the score is from
/// `maximizing_side`'s point of view. At depth zero, or when
/// `side_to_move` has no legal move, no move is returned.
///
/// # Errors
///
/// Fails fast on a negative depth or one above [`MAX_SEARCH_DEPTH`].
pub fn search(
    board: &Board,
    depth: i32,
    maximizing_side: Side,
    alpha: f64,
    beta: f64,
    side_to_move: Side,
) -> Result<(f64, Option<Move>), SearchError> {
    Searcher::new(SearchLimits::default()).search(
        board,
        depth,
        maximizing_side,
        alpha,
        beta,
        side_to_move,
    )
}

/// Picks the best hop for `side` among all of its legal moves.
///
/// A side with no legal move gets the losing score and no move.
#[instrument(skip(board, limits))]
pub fn best_move(
    board: &Board,
    side: Side,
    depth: i32,
    limits: SearchLimits,
) -> Result<SearchResult, SearchError> {
    let moves = crate::rules::legal_moves_for_side(board, side, limits.must_capture);
    if moves.is_empty() {
        let mut searcher = Searcher::new(limits);
        let (score, _) =
            searcher.search(board, depth, side, f64::NEG_INFINITY, f64::INFINITY, side)?;
        return Ok(SearchResult {
            score,
            best_move: None,
            nodes: searcher.nodes(),
        });
    }
    search_moves(board, &moves, side, depth, limits)
}

/// Picks the best hop for `side` from an explicit list of root moves.
///
/// Used when only some hops are allowed, such as the captures that
/// continue a multi-jump. Uses the parallel root when `limits.parallel`
/// is set and no node budget is configured.
pub fn search_moves(
    board: &Board,
    moves: &[Move],
    side: Side,
    depth: i32,
    limits: SearchLimits,
) -> Result<SearchResult, SearchError> {
    let depth = check_depth(depth)?;
    if limits.parallel && limits.node_budget.is_none() {
        Ok(parallel::search_root(board, moves, side, depth, limits))
    } else {
        Ok(Searcher::new(limits).search_root(board, moves, side, depth))
    }
}
