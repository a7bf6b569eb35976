//! Game session: turn order, lifecycle, history and the engine driver.
//!
//! A [`GameSession`] owns the current [`Board`] and moves through
//! `Pending → Active → {Completed, Drawn}`, with `Active ⇄ Paused` on the
//! side. Every accepted hop replaces the board wholesale.

mod clock;
mod history;

pub use clock::Clock;
pub use history::{HalfTurn, History, TurnEntry};

use crate::action::{Move, MoveError, MoveRecord};
use crate::board::Board;
use crate::config::SessionConfig;
use crate::position::Position;
use crate::record::{SaveError, SavedMatch};
use crate::rules::{
    Continuation, DrawReason, Outcome, apply_hop, check_outcome, legal_moves_for_side, resolve,
};
use crate::search::{SearchError, SearchResult, search_moves};
use crate::types::Side;
use chrono::Utc;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameStatus {
    /// Created, not yet started.
    Pending,
    /// Accepting moves.
    Active,
    /// Suspended; the clock does not run.
    Paused,
    /// Someone won.
    Completed,
    /// Ended without a winner.
    Drawn,
}

impl GameStatus {
    /// Returns true once the game has ended.
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Completed | GameStatus::Drawn)
    }
}

/// Illegal lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionError {
    /// `start` outside `Pending`.
    #[display("Cannot start a game that is {}", _0)]
    NotPending(GameStatus),
    /// `pause` outside `Active`.
    #[display("Cannot pause a game that is {}", _0)]
    NotActive(GameStatus),
    /// `resume` outside `Paused`.
    #[display("Cannot resume a game that is {}", _0)]
    NotPaused(GameStatus),
}

impl std::error::Error for SessionError {}

/// What happened after an accepted hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The same piece must capture again.
    Continue {
        /// Square of the jumping piece.
        from: Position,
        /// Captures available from it.
        captures: Vec<Move>,
    },
    /// The turn passed to `next`.
    Passed {
        /// Side now to move.
        next: Side,
    },
    /// The game ended.
    GameOver(Outcome),
}

/// Hops played by the engine in one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTurn {
    /// Side the engine played.
    pub side: Side,
    /// Every hop, in order.
    pub hops: Vec<Move>,
    /// Score of the last search, from `side`'s point of view.
    pub score: f64,
    /// Nodes visited across all searches of the turn.
    pub nodes: u64,
    /// State after the last hop.
    pub outcome: TurnOutcome,
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current board.
    pub board: Board,
    /// Side to move.
    pub to_move: Side,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Result, once the game is over.
    pub outcome: Option<Outcome>,
    /// Number of the turn in progress.
    pub turn_number: u32,
    /// Time used per side.
    pub clock: Clock,
    /// Square that must keep jumping, if any.
    pub pending_continuation: Option<Position>,
    /// History as saved-match lines.
    pub history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingJump {
    from: Position,
    captures: Vec<Move>,
}

/// A checkers game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    to_move: Side,
    status: GameStatus,
    outcome: Option<Outcome>,
    selected: Option<Position>,
    pending: Option<PendingJump>,
    clock: Clock,
    history: History,
    records: Vec<MoveRecord>,
}

impl GameSession {
    /// Creates a pending session on the initial board.
    #[instrument(skip(config), fields(first = %config.first_side(), engine = ?config.engine_side()))]
    pub fn new(config: SessionConfig) -> Self {
        info!("Creating new game session");
        Self {
            to_move: *config.first_side(),
            config,
            board: Board::initial(),
            status: GameStatus::Pending,
            outcome: None,
            selected: None,
            pending: None,
            clock: Clock::default(),
            history: History::default(),
            records: Vec::new(),
        }
    }

    /// Creates a pending session on an arbitrary board with `to_move` to play.
    pub fn with_board(config: SessionConfig, board: Board, to_move: Side) -> Self {
        debug!(%to_move, "Session on custom board");
        Self {
            board,
            to_move,
            ..Self::new(config)
        }
    }

    /// `Pending → Active`.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.status != GameStatus::Pending {
            warn!(status = %self.status, "Start rejected");
            return Err(SessionError::NotPending(self.status));
        }
        self.status = GameStatus::Active;
        info!(to_move = %self.to_move, "Game started");
        self.check_terminal();
        Ok(())
    }

    /// `Active → Paused`. Board and turn are untouched.
    #[instrument(skip(self))]
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.status != GameStatus::Active {
            warn!(status = %self.status, "Pause rejected");
            return Err(SessionError::NotActive(self.status));
        }
        self.status = GameStatus::Paused;
        debug!("Game paused");
        Ok(())
    }

    /// `Paused → Active`.
    #[instrument(skip(self))]
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.status != GameStatus::Paused {
            warn!(status = %self.status, "Resume rejected");
            return Err(SessionError::NotPaused(self.status));
        }
        self.status = GameStatus::Active;
        debug!("Game resumed");
        Ok(())
    }

    /// Resets board, clock and history, and starts playing at once.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        *self = Self::new(self.config.clone());
        self.status = GameStatus::Active;
        info!("New game");
        self.check_terminal();
    }

    /// Charges `elapsed` to the side to move while the game is active.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.status == GameStatus::Active {
            self.clock.charge(self.to_move, elapsed);
        }
    }

    /// Charges `elapsed` to `side` unless the game is pending or paused.
    ///
    /// Engine drivers use this after [`play_engine_turn`](Self::play_engine_turn),
    /// when the turn has already passed to the opponent.
    pub fn charge(&mut self, side: Side, elapsed: Duration) {
        if !matches!(self.status, GameStatus::Pending | GameStatus::Paused) {
            self.clock.charge(side, elapsed);
        }
    }

    /// Legal hops for the piece on `pos`.
    ///
    /// Side-wide mandatory capture applies, so a piece with only simple
    /// moves has none while another piece can capture. During a
    /// multi-jump only the jumping piece has moves.
    pub fn legal_moves_at(&self, pos: Position) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.from == pos)
            .collect()
    }

    /// All legal hops for the side to move; empty unless the game is active.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.status != GameStatus::Active {
            return Vec::new();
        }
        match &self.pending {
            Some(jump) => jump.captures.clone(),
            None => legal_moves_for_side(&self.board, self.to_move, *self.config.must_capture()),
        }
    }

    /// Selects the piece on `pos` and returns its legal hops.
    #[instrument(skip(self), fields(pos = %pos))]
    pub fn select(&mut self, pos: Position) -> Result<Vec<Move>, MoveError> {
        self.check_owner(pos)?;
        self.selected = Some(pos);
        Ok(self.legal_moves_at(pos))
    }

    /// Square selected by [`select`](Self::select), cleared by each hop.
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Plays one hop for the side to move.
    ///
    /// # Errors
    ///
    /// Rejects the hop, leaving the session unchanged, if the game is not
    /// active, the square is empty or enemy, a multi-jump must continue
    /// from another square, or the hop is not legal.
    #[instrument(skip(self), fields(mv = %mv, side = %self.to_move))]
    pub fn make_move(&mut self, mv: Move) -> Result<TurnOutcome, MoveError> {
        self.check_owner(mv.from)?;
        if !self.legal_moves().contains(&mv) {
            warn!("Illegal move rejected");
            return Err(MoveError::IllegalMove(mv));
        }

        let hop = apply_hop(&self.board, mv, self.to_move)?;
        self.board = hop.board;
        self.selected = None;
        self.records.push(MoveRecord::new(self.to_move, mv, Utc::now()));
        self.history.record(mv);
        debug!(capture = mv.is_capture(), promoted = hop.promoted, "Hop accepted");

        match resolve(&hop) {
            Continuation::Continue { from, captures } => {
                self.pending = Some(PendingJump {
                    from,
                    captures: captures.clone(),
                });
                Ok(TurnOutcome::Continue { from, captures })
            }
            Continuation::TurnOver => Ok(self.end_turn()),
        }
    }

    /// Abandons the remaining hops of a multi-jump and ends the turn.
    #[instrument(skip(self))]
    pub fn skip_extra_hops(&mut self) -> Result<TurnOutcome, MoveError> {
        self.require_active()?;
        if self.pending.is_none() {
            warn!("Skip requested with no multi-jump in progress");
            return Err(MoveError::NoContinuation);
        }
        info!(side = %self.to_move, "Skipping extra hops");
        Ok(self.end_turn())
    }

    /// Returns true if the engine plays the side to move.
    pub fn is_engine_turn(&self) -> bool {
        self.status == GameStatus::Active && *self.config.engine_side() == Some(self.to_move)
    }

    /// Asks the engine for the next hop at the configured depth, without
    /// playing it.
    pub fn engine_move(&self) -> Result<SearchResult, MoveError> {
        self.search_at_depth(*self.config.search_depth())
    }

    /// Plays every hop of the engine's turn.
    ///
    /// # Errors
    ///
    /// [`MoveError::NotEngineTurn`] if the side to move is played by a
    /// human.
    #[instrument(skip(self), fields(side = %self.to_move))]
    pub fn play_engine_turn(&mut self) -> Result<EngineTurn, MoveError> {
        self.require_active()?;
        if !self.is_engine_turn() {
            return Err(MoveError::NotEngineTurn(self.to_move));
        }
        self.play_turn_at_depth(*self.config.search_depth())
    }

    /// Plays the side to move with the search engine at `depth`,
    /// regardless of which side the engine is configured to play.
    ///
    /// # Errors
    ///
    /// [`SearchError::ZeroDepth`] when `depth` is zero, since no move
    /// would be chosen.
    #[instrument(skip(self), fields(side = %self.to_move))]
    pub fn play_turn_at_depth(&mut self, depth: u32) -> Result<EngineTurn, MoveError> {
        let side = self.to_move;
        let mut hops = Vec::new();
        let mut nodes = 0;
        loop {
            let result = self.search_at_depth(depth)?;
            nodes += result.nodes;
            let mv = result.best_move.ok_or(MoveError::NoLegalMoves(side))?;
            let outcome = self.make_move(mv)?;
            hops.push(mv);
            if !matches!(outcome, TurnOutcome::Continue { .. }) {
                info!(hops = hops.len(), score = result.score, nodes, "Engine turn played");
                return Ok(EngineTurn {
                    side,
                    hops,
                    score: result.score,
                    nodes,
                    outcome,
                });
            }
        }
    }

    fn search_at_depth(&self, depth: u32) -> Result<SearchResult, MoveError> {
        self.require_active()?;
        let moves = self.legal_moves();
        if moves.is_empty() {
            return Err(MoveError::NoLegalMoves(self.to_move));
        }
        if depth == 0 {
            warn!("Engine search requested at depth zero");
            return Err(MoveError::Search(SearchError::ZeroDepth));
        }
        let depth = i32::try_from(depth).unwrap_or(i32::MAX);
        Ok(search_moves(
            &self.board,
            &moves,
            self.to_move,
            depth,
            self.config.search_limits(),
        )?)
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Result, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Square that must keep jumping, if a multi-jump is in progress.
    pub fn pending_continuation(&self) -> Option<Position> {
        self.pending.as_ref().map(|jump| jump.from)
    }

    /// Aggregated turn history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Every accepted hop, in order.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// Number of the turn in progress.
    pub fn turn_number(&self) -> u32 {
        self.history.turn_number()
    }

    /// Time used per side.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Serializable view of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            to_move: self.to_move,
            status: self.status,
            outcome: self.outcome,
            turn_number: self.turn_number(),
            clock: self.clock,
            pending_continuation: self.pending_continuation(),
            history: self
                .saved_match()
                .lines()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// The history in saved-match form.
    pub fn saved_match(&self) -> SavedMatch {
        let lines = self.history.saved_lines(self.to_move);
        SavedMatch::from_lines(lines).unwrap_or_else(|e| {
            warn!(error = %e, "History produced an invalid saved match");
            SavedMatch::default()
        })
    }

    /// Writes the history to `path`.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        self.saved_match().save_to_path(path)
    }

    /// Rebuilds an active session by replaying a saved match.
    ///
    /// Hops are applied without legality checks. A multi-jump that was
    /// in progress when the match was saved is treated as finished.
    #[instrument(skip(config, saved), fields(lines = saved.lines().len()))]
    pub fn load(config: SessionConfig, saved: &SavedMatch) -> Result<Self, SaveError> {
        let replayed = saved.replay(*config.first_side())?;
        let mut session = Self::new(config);
        session.board = replayed.board;
        session.to_move = replayed.to_move;
        session.history = History::from_saved(saved.lines());
        session.records = saved
            .lines()
            .iter()
            .flat_map(|line| line.moves.iter().map(|&mv| (line.side, mv)))
            .map(|(side, mv)| MoveRecord::new(side, mv, Utc::now()))
            .collect();
        session.status = GameStatus::Active;
        info!(
            hops = replayed.hops,
            to_move = %session.to_move,
            turn = session.turn_number(),
            "Session restored"
        );
        session.check_terminal();
        Ok(session)
    }

    /// Reads a saved match from `path` and replays it.
    pub fn load_from_path(
        config: SessionConfig,
        path: impl AsRef<Path>,
    ) -> Result<Self, SaveError> {
        let saved = SavedMatch::load_from_path(path)?;
        Self::load(config, &saved)
    }

    fn require_active(&self) -> Result<(), MoveError> {
        if self.status != GameStatus::Active {
            warn!(status = %self.status, "Move requested while game is not active");
            return Err(MoveError::GameNotActive(self.status));
        }
        Ok(())
    }

    fn check_owner(&self, pos: Position) -> Result<(), MoveError> {
        self.require_active()?;
        let owner = self.board.get(pos).side().ok_or_else(|| {
            warn!(%pos, "No piece on square");
            MoveError::EmptySquare(pos)
        })?;
        if owner != self.to_move {
            warn!(%pos, %owner, "Piece belongs to the other side");
            return Err(MoveError::NotYourPiece {
                at: pos,
                owner,
                to_move: self.to_move,
            });
        }
        if let Some(jump) = &self.pending {
            if pos != jump.from {
                warn!(required = %jump.from, "Multi-jump must continue");
                return Err(MoveError::ContinuationRequired(jump.from));
            }
        }
        Ok(())
    }

    fn end_turn(&mut self) -> TurnOutcome {
        self.pending = None;
        self.selected = None;
        self.history.end_half_turn(self.to_move);
        self.to_move = self.to_move.opponent();
        debug!(next = %self.to_move, "Turn passed");
        match self.check_terminal() {
            Some(outcome) => TurnOutcome::GameOver(outcome),
            None => TurnOutcome::Passed { next: self.to_move },
        }
    }

    fn check_terminal(&mut self) -> Option<Outcome> {
        let outcome = check_outcome(&self.board, self.to_move).or_else(|| {
            (*self.config.max_turns())
                .filter(|&max| self.history.entries().len() >= max as usize)
                .map(|_| Outcome::Draw(DrawReason::TurnLimit))
        })?;
        self.history.flush();
        self.pending = None;
        self.outcome = Some(outcome);
        self.status = if outcome.is_draw() {
            GameStatus::Drawn
        } else {
            GameStatus::Completed
        };
        info!(%outcome, "Game over");
        Some(outcome)
    }
}
