//! Saved match text: one line per half-turn.
//!
//! ```text
//! Turn 1 R: (5,0)->(4,1)
//! Turn 1 B: (2,3)->(3,2)
//! Turn 2 R: (4,1)->(2,3) | (2,3)->(0,1)
//! Turn 2 B: --
//! ```
//!
//! `--` marks a half-turn with no hops. Lines that do not start with
//! `Turn` are ignored.

use crate::action::Move;
use crate::board::Board;
use crate::notation::{NotationError, parse_move};
use crate::rules::{ApplyError, apply};
use crate::types::Side;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

const EMPTY_HALF_TURN: &str = "--";

/// Failure to read, parse or replay a saved match.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum SaveError {
    /// A `Turn` line does not have the expected shape.
    #[display("Line {}: {}", line, reason)]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: &'static str,
    },

    /// A move on a `Turn` line could not be decoded.
    #[display("Line {}: {}", line, source)]
    BadMove {
        /// 1-based line number.
        line: usize,
        /// Decoder error.
        source: NotationError,
    },

    /// Turn numbers went backwards.
    #[display("Line {}: turn {} follows turn {}", line, turn, previous)]
    TurnOrder {
        /// 1-based line number.
        line: usize,
        /// Turn number found.
        turn: u32,
        /// Turn number of the previous line.
        previous: u32,
    },

    /// A side appears twice in one turn.
    #[display("Line {}: {} already moved in turn {}", line, side, turn)]
    DuplicateSide {
        /// 1-based line number.
        line: usize,
        /// Turn number.
        turn: u32,
        /// Repeated side.
        side: Side,
    },

    /// The applicator rejected a saved hop.
    #[display("Turn {} {}: cannot replay {}: {}", turn, side, mv, source)]
    Replay {
        /// Turn number.
        turn: u32,
        /// Side of the line.
        side: Side,
        /// The rejected hop.
        mv: Move,
        /// Applicator error.
        source: ApplyError,
    },

    /// Reading or writing the file failed.
    #[display("Failed to access {}: {}", path.display(), kind)]
    Io {
        /// File involved.
        path: PathBuf,
        /// Kind of I/O failure.
        kind: std::io::ErrorKind,
    },
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::BadMove { source, .. } => Some(source),
            SaveError::Replay { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// The hops of one side during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct SavedLine {
    /// 1-based turn number.
    pub turn: u32,
    /// Side that moved.
    pub side: Side,
    /// Hops in play order; empty renders as `--`.
    pub moves: Vec<Move>,
}

impl std::fmt::Display for SavedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Turn {} {}: ", self.turn, self.side.letter())?;
        if self.moves.is_empty() {
            return f.write_str(EMPTY_HALF_TURN);
        }
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", mv)?;
        }
        Ok(())
    }
}

/// Position reached by replaying a saved match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replayed {
    /// Final board.
    pub board: Board,
    /// Side to move after the last line.
    pub to_move: Side,
    /// Hops applied.
    pub hops: usize,
}

/// A parsed saved match, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMatch {
    lines: Vec<SavedLine>,
}

impl SavedMatch {
    /// Builds a saved match, checking turn order and one line per side per turn.
    pub fn from_lines(lines: Vec<SavedLine>) -> Result<Self, SaveError> {
        check_order(lines.iter().enumerate().map(|(i, l)| (i + 1, l)))?;
        Ok(Self { lines })
    }

    /// The lines in file order.
    pub fn lines(&self) -> &[SavedLine] {
        &self.lines
    }

    /// Returns true if there are no `Turn` lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Parses saved match text.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse(text: &str) -> Result<Self, SaveError> {
        let mut lines = Vec::new();
        let mut numbered = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let raw = raw.trim();
            if !raw.starts_with("Turn") {
                continue;
            }
            lines.push(parse_line(idx + 1, raw)?);
            numbered.push(idx + 1);
        }
        check_order(numbered.into_iter().zip(lines.iter()))?;
        debug!(lines = lines.len(), "Parsed saved match");
        Ok(Self { lines })
    }

    /// Renders the text form, one line per half-turn.
    pub fn render(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    /// Replays every hop from the initial board without legality checks.
    ///
    /// The side to move afterwards is the opponent of the last side that
    /// played a hop, or `first_side` when nothing was played.
    ///
    /// # Errors
    ///
    /// Stops at the first hop the applicator rejects.
    #[instrument(skip(self), fields(lines = self.lines.len()))]
    pub fn replay(&self, first_side: Side) -> Result<Replayed, SaveError> {
        let mut board = Board::initial();
        let mut to_move = first_side;
        let mut hops = 0;
        for line in &self.lines {
            for &mv in &line.moves {
                board = apply(&board, mv, line.side).map_err(|source| {
                    error!(turn = line.turn, side = %line.side, %mv, "Saved hop failed to replay");
                    SaveError::Replay {
                        turn: line.turn,
                        side: line.side,
                        mv,
                        source,
                    }
                })?;
                hops += 1;
            }
            if !line.moves.is_empty() {
                to_move = line.side.opponent();
            }
        }
        debug!(hops, next = %to_move, "Replay complete");
        Ok(Replayed {
            board,
            to_move,
            hops,
        })
    }

    /// Writes the text form to `path`.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        std::fs::write(path, self.render()).map_err(|e| io_error(path, &e))?;
        info!(lines = self.lines.len(), "Match saved");
        Ok(())
    }

    /// Reads and parses a saved match from `path`.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SaveError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| io_error(path, &e))?;
        let saved = Self::parse(&text)?;
        info!(lines = saved.lines.len(), "Match loaded");
        Ok(saved)
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> SaveError {
    error!(error = %err, "Saved match I/O failed");
    SaveError::Io {
        path: path.to_path_buf(),
        kind: err.kind(),
    }
}

fn parse_line(line: usize, raw: &str) -> Result<SavedLine, SaveError> {
    let malformed = |reason| SaveError::Malformed { line, reason };
    let (head, tail) = raw
        .split_once(':')
        .ok_or_else(|| malformed("missing ':' after the side"))?;

    let mut parts = head.split_whitespace().skip(1);
    let turn: u32 = parts
        .next()
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| malformed("turn number is missing or not a number"))?;
    if turn == 0 {
        return Err(malformed("turn numbers start at 1"));
    }
    let side = parts
        .next()
        .and_then(Side::from_letter)
        .ok_or_else(|| malformed("side must be R or B"))?;
    if parts.next().is_some() {
        return Err(malformed("unexpected text before ':'"));
    }

    let tail = tail.trim();
    let moves = match tail {
        "" => return Err(malformed("no moves listed")),
        EMPTY_HALF_TURN => Vec::new(),
        _ => tail
            .split('|')
            .map(|m| parse_move(m.trim()).map_err(|source| SaveError::BadMove { line, source }))
            .collect::<Result<_, _>>()?,
    };
    Ok(SavedLine { turn, side, moves })
}

fn check_order<'a>(lines: impl Iterator<Item = (usize, &'a SavedLine)>) -> Result<(), SaveError> {
    let mut previous: Option<&SavedLine> = None;
    for (line, current) in lines {
        if let Some(prev) = previous {
            if current.turn < prev.turn {
                return Err(SaveError::TurnOrder {
                    line,
                    turn: current.turn,
                    previous: prev.turn,
                });
            }
            if current.turn == prev.turn && current.side == prev.side {
                return Err(SaveError::DuplicateSide {
                    line,
                    turn: current.turn,
                    side: current.side,
                });
            }
        }
        previous = Some(current);
    }
    Ok(())
}
