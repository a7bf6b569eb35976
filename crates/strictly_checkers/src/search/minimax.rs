//! Sequential alpha-beta search.

use super::{SearchError, SearchLimits, SearchResult, WIN_SCORE, check_depth};
use crate::action::Move;
use crate::board::Board;
use crate::eval::evaluate_for;
use crate::rules::{apply, legal_moves_for_side};
use crate::types::Side;
use tracing::{debug, error};

/// Alpha-beta searcher with a node counter and optional node budget.
///
/// The budget is checked before each node is expanded; once exhausted,
/// remaining nodes are scored statically.
#[derive(Debug, Clone)]
pub struct Searcher {
    limits: SearchLimits,
    nodes: u64,
}

impl Searcher {
    /// Creates a searcher with the given limits.
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits, nodes: 0 }
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Runs minimax with alpha-beta pruning from an explicit window.
    ///
    /// See [`search`](super::search) for the contract.
    pub fn search(
        &mut self,
        board: &Board,
        depth: i32,
        maximizing_side: Side,
        alpha: f64,
        beta: f64,
        side_to_move: Side,
    ) -> Result<(f64, Option<Move>), SearchError> {
        let depth = check_depth(depth)?;
        Ok(self.alpha_beta(board, depth, maximizing_side, alpha, beta, side_to_move))
    }

    /// Searches `moves` for `side` with a full window.
    ///
    /// Ties keep the earliest move in `moves`. Only moves from the list
    /// are returned; an empty list scores the board statically.
    pub fn search_root(
        &mut self,
        board: &Board,
        moves: &[Move],
        side: Side,
        depth: u32,
    ) -> SearchResult {
        let (score, best_move) = if depth == 0 {
            self.alpha_beta(board, depth, side, f64::NEG_INFINITY, f64::INFINITY, side)
        } else if moves.is_empty() {
            self.nodes += 1;
            (evaluate_for(board, side), None)
        } else {
            self.expand(
                board,
                moves,
                depth,
                side,
                f64::NEG_INFINITY,
                f64::INFINITY,
                side,
            )
        };
        debug!(
            %side,
            depth,
            nodes = self.nodes,
            score,
            best_move = ?best_move.map(|m| m.to_string()),
            "Search complete"
        );
        SearchResult {
            score,
            best_move,
            nodes: self.nodes,
        }
    }

    fn budget_exhausted(&self) -> bool {
        self.limits
            .node_budget
            .is_some_and(|budget| self.nodes >= budget)
    }

    pub(super) fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: Side,
        alpha: f64,
        beta: f64,
        to_move: Side,
    ) -> (f64, Option<Move>) {
        self.nodes += 1;
        if depth == 0 || self.budget_exhausted() {
            return (evaluate_for(board, maximizing), None);
        }
        let moves = legal_moves_for_side(board, to_move, self.limits.must_capture);
        if moves.is_empty() {
            // The side to move cannot move and loses.
            let score = WIN_SCORE + f64::from(depth);
            return (if to_move == maximizing { -score } else { score }, None);
        }
        self.expand(board, &moves, depth, maximizing, alpha, beta, to_move)
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &mut self,
        board: &Board,
        moves: &[Move],
        depth: u32,
        maximizing: Side,
        mut alpha: f64,
        mut beta: f64,
        to_move: Side,
    ) -> (f64, Option<Move>) {
        let max_node = to_move == maximizing;
        let mut best = if max_node {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        let mut best_move = None;

        for &mv in moves {
            let child = match apply(board, mv, to_move) {
                Ok(child) => child,
                Err(e) => {
                    error!(error = %e, "Generated move failed to apply");
                    continue;
                }
            };
            let (score, _) =
                self.alpha_beta(&child, depth - 1, maximizing, alpha, beta, to_move.opponent());
            if max_node {
                if score > best {
                    best = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best {
                    best = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        (best, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::types::Cell;

    fn board(pieces: &[((u8, u8), Cell)]) -> Board {
        let pieces: Vec<_> = pieces
            .iter()
            .map(|&((r, c), cell)| (Position::at(r, c), cell))
            .collect();
        Board::with_pieces(&pieces).expect("valid fixture")
    }

    /// Plain minimax with the same conventions and no pruning.
    fn minimax(board: &Board, depth: u32, maximizing: Side, to_move: Side) -> f64 {
        if depth == 0 {
            return evaluate_for(board, maximizing);
        }
        let moves = legal_moves_for_side(board, to_move, true);
        if moves.is_empty() {
            let score = WIN_SCORE + f64::from(depth);
            return if to_move == maximizing { -score } else { score };
        }
        let scores = moves.iter().map(|&mv| {
            let child = apply(board, mv, to_move).expect("generated move applies");
            minimax(&child, depth - 1, maximizing, to_move.opponent())
        });
        if to_move == maximizing {
            scores.fold(f64::NEG_INFINITY, f64::max)
        } else {
            scores.fold(f64::INFINITY, f64::min)
        }
    }

    fn full_window(board: &Board, depth: i32, side: Side) -> (f64, Option<Move>) {
        Searcher::new(SearchLimits::default())
            .search(board, depth, side, f64::NEG_INFINITY, f64::INFINITY, side)
            .unwrap()
    }

    #[test]
    fn test_depth_zero_returns_evaluation() {
        let b = board(&[((5, 2), Cell::RedMan)]);
        let (score, mv) = full_window(&b, 0, Side::Red);
        assert_eq!(mv, None);
        assert_eq!(score, evaluate_for(&b, Side::Red));
    }

    #[test]
    fn test_takes_free_capture() {
        let b = board(&[
            ((4, 1), Cell::RedMan),
            ((3, 2), Cell::BlackMan),
            ((0, 7), Cell::BlackMan),
        ]);
        let (_, mv) = full_window(&b, 1, Side::Red);
        assert_eq!(mv, Some(Move::between((4, 1), (2, 3))));
    }

    #[test]
    fn test_no_moves_is_a_loss() {
        let b = board(&[((1, 0), Cell::RedMan), ((0, 1), Cell::BlackMan)]);
        let (score, mv) = full_window(&b, 2, Side::Red);
        assert_eq!(mv, None);
        assert_eq!(score, -(WIN_SCORE + 2.0));
    }

    #[test]
    fn test_matches_plain_minimax() {
        let b = Board::initial();
        for depth in 1..=3 {
            for side in [Side::Red, Side::Black] {
                let (score, _) = full_window(&b, depth as i32, side);
                assert_eq!(score, minimax(&b, depth, side, side), "depth {}", depth);
            }
        }
    }

    #[test]
    fn test_window_width_does_not_change_result() {
        let b = board(&[
            ((5, 0), Cell::RedMan),
            ((5, 4), Cell::RedMan),
            ((6, 3), Cell::RedMan),
            ((2, 1), Cell::BlackMan),
            ((2, 5), Cell::BlackMan),
            ((1, 6), Cell::BlackMan),
        ]);
        let wide = full_window(&b, 3, Side::Red);
        let narrow = Searcher::new(SearchLimits::default())
            .search(&b, 3, Side::Red, -50.0, 50.0, Side::Red)
            .unwrap();
        assert_eq!(wide, narrow);
    }

    #[test]
    fn test_sides_alternate() {
        // Whichever side moves first captures the other's only piece.
        let b = board(&[((5, 2), Cell::RedMan), ((4, 3), Cell::BlackMan)]);
        let (red_first, _) = full_window(&b, 1, Side::Red);
        let (score, mv) = Searcher::new(SearchLimits::default())
            .search(&b, 1, Side::Red, f64::NEG_INFINITY, f64::INFINITY, Side::Black)
            .unwrap();
        assert_eq!(mv, Some(Move::between((4, 3), (6, 1))));
        assert!(red_first > score);
    }

    #[test]
    fn test_budget_limits_nodes() {
        let b = Board::initial();
        let moves = legal_moves_for_side(&b, Side::Red, true);
        let budgeted = Searcher::new(SearchLimits::default().with_node_budget(Some(50)))
            .search_root(&b, &moves, Side::Red, 6);
        let unbounded = Searcher::new(SearchLimits::default()).search_root(&b, &moves, Side::Red, 6);
        assert!(budgeted.best_move.is_some());
        // Past the budget, each open level still scores its remaining
        // siblings statically.
        assert!(budgeted.nodes < 150, "visited {}", budgeted.nodes);
        assert!(unbounded.nodes > budgeted.nodes);
    }

    #[test]
    fn test_empty_root_list_returns_no_move() {
        let b = Board::initial();
        let result = Searcher::new(SearchLimits::default()).search_root(&b, &[], Side::Red, 2);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, evaluate_for(&b, Side::Red));
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_deterministic() {
        let b = Board::initial();
        assert_eq!(full_window(&b, 3, Side::Black), full_window(&b, 3, Side::Black));
    }
}
