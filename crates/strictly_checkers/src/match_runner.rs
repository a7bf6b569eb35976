//! Engine-versus-engine matches.
//!
//! Two engine configurations play a fixed number of games, swapping
//! colors every game. A win scores one point for the winning engine;
//! draws score nothing.

use crate::action::MoveError;
use crate::config::SessionConfig;
use crate::rules::Outcome;
use crate::session::{GameSession, GameStatus};
use crate::types::Side;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Default number of games in a match.
pub const DEFAULT_GAMES: u32 = 3;
/// Default turn cap per game.
pub const DEFAULT_MAX_TURNS: u32 = 100;

/// An engine: a display name and a search depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct EngineSpec {
    /// Display name.
    pub name: String,
    /// Search depth in plies.
    pub depth: u32,
}

/// Match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum MatchStatus {
    /// No game played yet.
    Pending,
    /// Some games played.
    InProgress,
    /// All games played.
    Completed,
}

/// Result of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    /// 1-based game number.
    pub number: u32,
    /// Engine that played red.
    pub red: String,
    /// Engine that played black.
    pub black: String,
    /// How the game ended.
    pub outcome: Outcome,
    /// Full turns completed.
    pub turns: usize,
    /// Hops played.
    pub hops: usize,
}

impl GameResult {
    /// Name of the winning engine, if any.
    pub fn winner(&self) -> Option<&str> {
        self.outcome.winner().map(|side| match side {
            Side::Red => self.red.as_str(),
            Side::Black => self.black.as_str(),
        })
    }
}

/// Final standings of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Every game, in order.
    pub games: Vec<GameResult>,
    /// Points per engine, in the order the engines were given.
    pub scores: Vec<(String, u32)>,
    /// Engine with the most points; `None` on a tie.
    pub winner: Option<String>,
}

/// A series of games between two engines.
#[derive(Debug, Clone, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct Match {
    #[setters(skip)]
    engines: [EngineSpec; 2],
    /// Games to play.
    games: u32,
    /// Turn cap per game; reaching it draws the game.
    max_turns: u32,
    /// Mandatory capture for both engines.
    must_capture: bool,
    /// Root-parallel search for both engines.
    parallel_search: bool,
    #[setters(skip)]
    status: MatchStatus,
    #[setters(skip)]
    results: Vec<GameResult>,
    #[setters(skip)]
    scores: [u32; 2],
}

impl Match {
    /// A pending match with default settings.
    pub fn new(first: EngineSpec, second: EngineSpec) -> Self {
        Self {
            engines: [first, second],
            games: DEFAULT_GAMES,
            max_turns: DEFAULT_MAX_TURNS,
            must_capture: true,
            parallel_search: false,
            status: MatchStatus::Pending,
            results: Vec::new(),
            scores: [0, 0],
        }
    }

    /// Current status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Games played so far.
    pub fn results(&self) -> &[GameResult] {
        &self.results
    }

    /// Plays the next game, or returns `None` once all games are played.
    ///
    /// The first engine takes red in odd-numbered games.
    #[instrument(skip(self), fields(game = self.results.len() + 1))]
    pub fn play_next_game(&mut self) -> Result<Option<&GameResult>, MoveError> {
        if self.results.len() >= self.games as usize {
            self.status = MatchStatus::Completed;
            return Ok(None);
        }
        self.status = MatchStatus::InProgress;

        let number = self.results.len() as u32 + 1;
        let red_idx = if number % 2 == 1 { 0 } else { 1 };
        let black_idx = 1 - red_idx;
        let engine_for = |side: Side| match side {
            Side::Red => red_idx,
            Side::Black => black_idx,
        };

        let config = SessionConfig::two_player()
            .with_must_capture(self.must_capture)
            .with_parallel_search(self.parallel_search)
            .with_max_turns(Some(self.max_turns));
        let mut session = GameSession::new(config);
        session.new_game();

        while session.status() == GameStatus::Active {
            let depth = self.engines[engine_for(session.to_move())].depth;
            session.play_turn_at_depth(depth)?;
        }

        let outcome = match session.outcome() {
            Some(outcome) => outcome,
            None => return Err(MoveError::GameNotActive(session.status())),
        };
        if let Some(side) = outcome.winner() {
            self.scores[engine_for(side)] += 1;
        }
        let result = GameResult {
            number,
            red: self.engines[red_idx].name.clone(),
            black: self.engines[black_idx].name.clone(),
            outcome,
            turns: session.history().entries().len(),
            hops: session.records().len(),
        };
        info!(
            red = %result.red,
            black = %result.black,
            %outcome,
            turns = result.turns,
            "Game finished"
        );
        self.results.push(result);
        if self.results.len() >= self.games as usize {
            self.status = MatchStatus::Completed;
        }
        Ok(self.results.last())
    }

    /// Plays every remaining game and reports the standings.
    #[instrument(skip(self), fields(first = %self.engines[0].name, second = %self.engines[1].name, games = self.games))]
    pub fn run(&mut self) -> Result<MatchReport, MoveError> {
        while self.play_next_game()?.is_some() {}
        let report = self.report();
        info!(winner = ?report.winner, "Match complete");
        Ok(report)
    }

    /// Standings so far.
    pub fn report(&self) -> MatchReport {
        let [a, b] = self.scores;
        let winner = match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(self.engines[0].name.clone()),
            std::cmp::Ordering::Less => Some(self.engines[1].name.clone()),
            std::cmp::Ordering::Equal => None,
        };
        MatchReport {
            games: self.results.clone(),
            scores: self
                .engines
                .iter()
                .zip(self.scores)
                .map(|(engine, score)| (engine.name.clone(), score))
                .collect(),
            winner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_alternate() {
        let mut m = Match::new(EngineSpec::new("shallow".into(), 1), EngineSpec::new("deep".into(), 2))
            .with_games(2)
            .with_max_turns(20);
        assert_eq!(m.status(), MatchStatus::Pending);
        let report = m.run().unwrap();
        assert_eq!(m.status(), MatchStatus::Completed);
        assert_eq!(report.games.len(), 2);
        assert_eq!(report.games[0].red, "shallow");
        assert_eq!(report.games[1].red, "deep");
        let points: u32 = report.scores.iter().map(|(_, s)| s).sum();
        let decided = report.games.iter().filter(|g| g.winner().is_some()).count() as u32;
        assert_eq!(points, decided);
        assert!(report.games.iter().all(|g| g.turns <= 20));
    }

    #[test]
    fn test_zero_games_completes_at_once() {
        let mut m = Match::new(EngineSpec::new("a".into(), 1), EngineSpec::new("b".into(), 1))
            .with_games(0);
        let report = m.run().unwrap();
        assert!(report.games.is_empty());
        assert_eq!(report.winner, None);
        assert_eq!(m.status(), MatchStatus::Completed);
    }

    #[test]
    fn test_invalid_depth_is_reported() {
        let mut m = Match::new(EngineSpec::new("a".into(), 11), EngineSpec::new("b".into(), 1));
        assert!(matches!(m.run(), Err(MoveError::Search(_))));
    }

    #[test]
    fn test_zero_depth_engine_is_rejected() {
        let mut m = Match::new(EngineSpec::new("a".into(), 0), EngineSpec::new("b".into(), 1));
        assert_eq!(
            m.run().unwrap_err(),
            MoveError::Search(crate::search::SearchError::ZeroDepth)
        );
    }
}
