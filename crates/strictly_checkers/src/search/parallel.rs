//! Root-parallel search on the rayon pool.
//!
//! Each root move is searched with its own [`Searcher`] and a full window,
//! so the chosen move and score match the sequential search exactly.

use super::{SearchLimits, SearchResult, Searcher};
use crate::action::Move;
use crate::board::Board;
use crate::rules::apply;
use crate::types::Side;
use rayon::prelude::*;
use tracing::{debug, error};

pub(super) fn search_root(
    board: &Board,
    moves: &[Move],
    side: Side,
    depth: u32,
    limits: SearchLimits,
) -> SearchResult {
    let limits = limits.with_parallel(false);
    if depth == 0 || moves.is_empty() {
        return Searcher::new(limits).search_root(board, moves, side, depth);
    }

    let scored: Vec<(Move, f64, u64)> = moves
        .par_iter()
        .filter_map(|&mv| {
            let child = match apply(board, mv, side) {
                Ok(child) => child,
                Err(e) => {
                    error!(error = %e, "Generated move failed to apply");
                    return None;
                }
            };
            let mut searcher = Searcher::new(limits);
            let (score, _) = searcher.alpha_beta(
                &child,
                depth - 1,
                side,
                f64::NEG_INFINITY,
                f64::INFINITY,
                side.opponent(),
            );
            Some((mv, score, searcher.nodes()))
        })
        .collect();

    let mut best = f64::NEG_INFINITY;
    let mut best_move = None;
    for &(mv, score, _) in &scored {
        if score > best {
            best = score;
            best_move = Some(mv);
        }
    }
    let nodes = scored.iter().map(|&(_, _, n)| n).sum::<u64>();

    debug!(
        %side,
        depth,
        nodes,
        score = best,
        best_move = ?best_move.map(|m| m.to_string()),
        threads = rayon::current_num_threads(),
        "Parallel search complete"
    );
    SearchResult {
        score: best,
        best_move,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::legal_moves_for_side;

    #[test]
    fn test_matches_sequential() {
        let b = Board::initial();
        for side in [Side::Red, Side::Black] {
            let moves = legal_moves_for_side(&b, side, true);
            let limits = SearchLimits::default();
            let sequential = Searcher::new(limits).search_root(&b, &moves, side, 3);
            let parallel = search_root(&b, &moves, side, 3, limits.with_parallel(true));
            assert_eq!(parallel.score, sequential.score);
            assert_eq!(parallel.best_move, sequential.best_move);
        }
    }

    #[test]
    fn test_no_moves_defers_to_sequential() {
        let result = search_root(
            &Board::empty(),
            &[],
            Side::Red,
            2,
            SearchLimits::default(),
        );
        assert_eq!(result.best_move, None);
    }
}
