//! Strictly Checkers - a checkers (draughts) engine
//!
//! Board model, move rules, alpha-beta search and a game session that
//! drives an engine opponent.
//!
//! # Architecture
//!
//! - **Board**: `Copy` 8x8 grid of [`Cell`]s; every change yields a new board
//! - **Rules**: move generation, hop application, multi-jump resolution,
//!   terminal detection
//! - **Search**: depth-bounded minimax with alpha-beta pruning over [`evaluate`]
//! - **Session**: lifecycle, turn order, clock, history and saved matches
//! - **Match**: engine-versus-engine series
//!
//! # Example
//!
//! ```
//! use strictly_checkers::{GameSession, Move, SessionConfig, TurnOutcome};
//!
//! let mut session = GameSession::new(SessionConfig::default());
//! session.start()?;
//! let outcome = session.make_move("(5,0)->(4,1)".parse::<Move>()?)?;
//! assert!(matches!(outcome, TurnOutcome::Passed { .. }));
//! let reply = session.play_engine_turn()?;
//! assert!(!reply.hops.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod config;
mod eval;
mod match_runner;
mod notation;
mod position;
mod record;
mod session;
mod types;

pub mod rules;
pub mod search;

// Crate-level exports - Board model
pub use board::{Board, BoardError};
pub use position::{BOARD_SIZE, Position};
pub use types::{Cell, Side};

// Crate-level exports - Moves and notation
pub use action::{Move, MoveError, MoveRecord};
pub use notation::{NotationError, parse_move, try_parse_move};

// Crate-level exports - Rules and evaluation
pub use eval::{KING_VALUE, MAN_VALUE, MOBILITY_WEIGHT, evaluate, evaluate_for, material};
pub use rules::{ApplyError, Outcome, apply, legal_moves, legal_moves_for_side};
pub use search::{SearchError, SearchLimits, SearchResult, Searcher, best_move};

// Crate-level exports - Session
pub use config::{ConfigError, SessionConfig};
pub use record::{Replayed, SaveError, SavedLine, SavedMatch};
pub use session::{
    Clock, EngineTurn, GameSession, GameStatus, HalfTurn, History, SessionError,
    SessionSnapshot, TurnEntry, TurnOutcome,
};

// Crate-level exports - Engine matches
pub use match_runner::{
    DEFAULT_GAMES, DEFAULT_MAX_TURNS, EngineSpec, GameResult, Match, MatchReport, MatchStatus,
};
