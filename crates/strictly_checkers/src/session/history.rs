//! Turn history aggregated from individual hops.

use crate::action::Move;
use crate::record::SavedLine;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// The hops one side played during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct HalfTurn {
    /// Side that moved.
    pub side: Side,
    /// Hops in play order.
    pub moves: Vec<Move>,
}

/// One full turn: both sides' half-turns in play order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEntry {
    /// 1-based turn number.
    pub number: u32,
    /// The half-turn played first.
    pub first: HalfTurn,
    /// The half-turn played second; empty if the game ended before it.
    pub second: HalfTurn,
}

impl TurnEntry {
    /// The two saved-match lines for this turn, first side first.
    pub fn lines(&self) -> [SavedLine; 2] {
        [
            SavedLine::new(self.number, self.first.side, self.first.moves.clone()),
            SavedLine::new(self.number, self.second.side, self.second.moves.clone()),
        ]
    }
}

impl std::fmt::Display for TurnEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [first, second] = self.lines();
        write!(f, "{}\n{}", first, second)
    }
}

/// Append-only turn log.
///
/// Hops accumulate in the current half-turn. When the first side of a
/// pair finishes, its half-turn waits; when the second side finishes, the
/// pair becomes a [`TurnEntry`] and the turn number advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<TurnEntry>,
    waiting: Option<HalfTurn>,
    current: Vec<Move>,
    turn_number: u32,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            waiting: None,
            current: Vec::new(),
            turn_number: 1,
        }
    }
}

impl History {
    /// Completed turns.
    pub fn entries(&self) -> &[TurnEntry] {
        &self.entries
    }

    /// Number of the turn in progress.
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Hops of the half-turn in progress.
    pub fn current(&self) -> &[Move] {
        &self.current
    }

    pub(crate) fn record(&mut self, mv: Move) {
        self.current.push(mv);
    }

    pub(crate) fn end_half_turn(&mut self, side: Side) {
        let half = HalfTurn::new(side, std::mem::take(&mut self.current));
        match self.waiting.take() {
            None => self.waiting = Some(half),
            Some(first) => self.push_entry(first, half),
        }
    }

    /// Closes a pair left open when the game ended.
    pub(crate) fn flush(&mut self) {
        if let Some(first) = self.waiting.take() {
            let second = HalfTurn::new(first.side.opponent(), Vec::new());
            self.push_entry(first, second);
        }
    }

    fn push_entry(&mut self, first: HalfTurn, second: HalfTurn) {
        self.entries.push(TurnEntry {
            number: self.turn_number,
            first,
            second,
        });
        self.turn_number += 1;
    }

    /// Saved-match lines for everything played so far.
    ///
    /// A waiting half-turn and any hops of the half-turn in progress are
    /// written as lines of the current turn.
    pub fn saved_lines(&self, to_move: Side) -> Vec<SavedLine> {
        let mut lines: Vec<SavedLine> = self.entries.iter().flat_map(TurnEntry::lines).collect();
        if let Some(waiting) = &self.waiting {
            lines.push(SavedLine::new(
                self.turn_number,
                waiting.side,
                waiting.moves.clone(),
            ));
        }
        if !self.current.is_empty() {
            lines.push(SavedLine::new(self.turn_number, to_move, self.current.clone()));
        }
        lines
    }

    /// Rebuilds a history from saved lines in file order.
    ///
    /// Consecutive lines with the same turn number form one entry. A turn
    /// with a single line followed by a later turn is closed with an empty
    /// half-turn; a single trailing line is left waiting.
    pub fn from_saved(lines: &[SavedLine]) -> Self {
        let mut history = Self::default();
        let mut waiting: Option<&SavedLine> = None;
        for line in lines {
            match waiting.take() {
                Some(first) if first.turn == line.turn => {
                    history.turn_number = line.turn;
                    history.push_entry(
                        HalfTurn::new(first.side, first.moves.clone()),
                        HalfTurn::new(line.side, line.moves.clone()),
                    );
                }
                Some(first) => {
                    history.turn_number = first.turn;
                    history.push_entry(
                        HalfTurn::new(first.side, first.moves.clone()),
                        HalfTurn::new(first.side.opponent(), Vec::new()),
                    );
                    waiting = Some(line);
                }
                None => waiting = Some(line),
            }
        }
        if let Some(last) = waiting {
            history.turn_number = last.turn;
            history.waiting = Some(HalfTurn::new(last.side, last.moves.clone()));
        }
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Move = Move::between((5, 0), (4, 1));
    const B: Move = Move::between((2, 3), (3, 2));
    const C: Move = Move::between((4, 1), (2, 3));

    #[test]
    fn test_pairs_become_entries() {
        let mut history = History::default();
        history.record(A);
        history.end_half_turn(Side::Red);
        assert!(history.entries().is_empty());
        assert_eq!(history.turn_number(), 1);

        history.record(B);
        history.end_half_turn(Side::Black);
        assert_eq!(history.turn_number(), 2);
        assert_eq!(
            history.entries()[0].to_string(),
            "Turn 1 R: (5,0)->(4,1)\nTurn 1 B: (2,3)->(3,2)"
        );
    }

    #[test]
    fn test_flush_marks_missing_half() {
        let mut history = History::default();
        history.record(C);
        history.end_half_turn(Side::Red);
        history.flush();
        let entry = &history.entries()[0];
        assert_eq!(entry.second, HalfTurn::new(Side::Black, vec![]));
        assert_eq!(entry.to_string(), "Turn 1 R: (4,1)->(2,3)\nTurn 1 B: --");
    }

    #[test]
    fn test_saved_lines_round_trip() {
        let mut history = History::default();
        history.record(A);
        history.end_half_turn(Side::Red);
        history.record(B);
        history.end_half_turn(Side::Black);
        history.record(C);
        history.end_half_turn(Side::Red);

        let lines = history.saved_lines(Side::Black);
        assert_eq!(lines.len(), 3);
        assert_eq!(History::from_saved(&lines), history);
    }

    #[test]
    fn test_in_progress_hops_are_saved() {
        let mut history = History::default();
        history.record(A);
        let lines = history.saved_lines(Side::Red);
        assert_eq!(lines, vec![SavedLine::new(1, Side::Red, vec![A])]);
    }
}
