//! Core domain types for checkers: sides and cell contents.

use crate::eval::{KING_VALUE, MAN_VALUE};
use serde::{Deserialize, Serialize};

/// A side in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter, strum::Display,
)]
pub enum Side {
    /// Red (starts on rows 5-7, moves toward row 0).
    Red,
    /// Black (starts on rows 0-2, moves toward row 7).
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta of a man's forward step.
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// Row on which this side's men are promoted.
    pub fn promotion_row(self) -> u8 {
        match self {
            Side::Red => 0,
            Side::Black => 7,
        }
    }

    /// Single-letter tag used in saved match lines.
    pub fn letter(self) -> char {
        match self {
            Side::Red => 'R',
            Side::Black => 'B',
        }
    }

    /// Parses the single-letter tag used in saved match lines.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s {
            "R" => Some(Side::Red),
            "B" => Some(Side::Black),
            _ => None,
        }
    }
}

/// Contents of one board cell.
///
/// Piece kind and owner are encoded together so that "a red king" is a
/// single value rather than a pair that could disagree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// Red man.
    RedMan,
    /// Red king.
    RedKing,
    /// Black man.
    BlackMan,
    /// Black king.
    BlackKing,
}

impl Cell {
    /// Returns true for an empty cell.
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns true for either side's king.
    pub fn is_king(self) -> bool {
        matches!(self, Cell::RedKing | Cell::BlackKing)
    }

    /// Returns true for either side's man.
    pub fn is_man(self) -> bool {
        matches!(self, Cell::RedMan | Cell::BlackMan)
    }

    /// Owner of the piece, or `None` for an empty cell.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::RedMan | Cell::RedKing => Some(Side::Red),
            Cell::BlackMan | Cell::BlackKing => Some(Side::Black),
        }
    }

    /// Returns true if the cell holds a piece owned by `side`.
    pub fn belongs_to(self, side: Side) -> bool {
        self.side() == Some(side)
    }

    /// The enemy piece kinds (man and king) for capture testing.
    ///
    /// Empty cells have no opponents.
    pub fn opponents(self) -> &'static [Cell] {
        match self.side() {
            Some(Side::Red) => &[Cell::BlackMan, Cell::BlackKing],
            Some(Side::Black) => &[Cell::RedMan, Cell::RedKing],
            None => &[],
        }
    }

    /// Returns true if `other` is an enemy piece of this one.
    pub fn is_opponent_of(self, other: Cell) -> bool {
        self.opponents().contains(&other)
    }

    /// The man of the given side.
    pub fn man(side: Side) -> Self {
        match side {
            Side::Red => Cell::RedMan,
            Side::Black => Cell::BlackMan,
        }
    }

    /// The king of the given side.
    pub fn king(side: Side) -> Self {
        match side {
            Side::Red => Cell::RedKing,
            Side::Black => Cell::BlackKing,
        }
    }

    /// The king this piece becomes on promotion; kings and empty cells are unchanged.
    pub fn promoted(self) -> Self {
        match self {
            Cell::RedMan => Cell::RedKing,
            Cell::BlackMan => Cell::BlackKing,
            other => other,
        }
    }

    /// Diagonal directions `(drow, dcol)` this piece may travel in.
    ///
    /// Men move forward only; kings move in all four diagonals. The
    /// order is fixed and determines generator order.
    pub fn directions(self) -> &'static [(i8, i8)] {
        const UP: &[(i8, i8)] = &[(-1, -1), (-1, 1)];
        const DOWN: &[(i8, i8)] = &[(1, -1), (1, 1)];
        const ALL: &[(i8, i8)] = &[(-1, -1), (-1, 1), (1, -1), (1, 1)];
        match self {
            Cell::Empty => &[],
            Cell::RedMan => UP,
            Cell::BlackMan => DOWN,
            Cell::RedKing | Cell::BlackKing => ALL,
        }
    }

    /// Material weight used by the evaluator.
    pub fn material(self) -> f64 {
        match self {
            Cell::Empty => 0.0,
            Cell::RedMan | Cell::BlackMan => MAN_VALUE,
            Cell::RedKing | Cell::BlackKing => KING_VALUE,
        }
    }

    /// Text symbol: `_` empty, `r`/`R` red man/king, `b`/`B` black man/king.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::RedMan => 'r',
            Cell::RedKing => 'R',
            Cell::BlackMan => 'b',
            Cell::BlackKing => 'B',
        }
    }

    /// Parses a text symbol produced by [`Cell::symbol`].
    ///
    /// `.` (light square) is accepted as empty.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '_' | '.' => Some(Cell::Empty),
            'r' => Some(Cell::RedMan),
            'R' => Some(Cell::RedKing),
            'b' => Some(Cell::BlackMan),
            'B' => Some(Cell::BlackKing),
            _ => None,
        }
    }
}
