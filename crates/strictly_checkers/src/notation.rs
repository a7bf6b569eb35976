//! Move text encoding: `"(r,c)->(r,c)"`.

use crate::action::Move;
use crate::position::Position;
use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// Malformed move text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Malformed move {:?}: {}", input, reason)]
pub struct NotationError {
    /// The text that failed to parse.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl NotationError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Decodes `"(r,c)->(r,c)"` into a [`Move`].
///
/// Whitespace around the parts is tolerated. Coordinates must be on the
/// board. Nothing about legality is checked.
#[instrument]
pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let (from, to) = text
        .split_once("->")
        .ok_or_else(|| NotationError::new(text, "missing '->'"))?;
    let from = parse_square(text, from)?;
    let to = parse_square(text, to)?;
    Ok(Move::new(from, to))
}

/// Same as [`parse_move`], but logs and discards the error.
pub fn try_parse_move(text: &str) -> Option<Move> {
    parse_move(text)
        .inspect_err(|e| warn!(error = %e, "Discarding move text"))
        .ok()
}

fn parse_square(input: &str, part: &str) -> Result<Position, NotationError> {
    let inner = part
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| NotationError::new(input, "square must be parenthesised"))?;
    let (row, col) = inner
        .split_once(',')
        .ok_or_else(|| NotationError::new(input, "square must be 'row,col'"))?;
    let row: u8 = row
        .trim()
        .parse()
        .map_err(|_| NotationError::new(input, "row is not a number"))?;
    let col: u8 = col
        .trim()
        .parse()
        .map_err(|_| NotationError::new(input, "column is not a number"))?;
    Position::new(row, col).ok_or_else(|| NotationError::new(input, "square is off the board"))
}

impl std::str::FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}
