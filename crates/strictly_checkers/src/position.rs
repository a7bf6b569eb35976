//! Board coordinates.

use serde::{Deserialize, Serialize};

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// A square on the 8x8 board, addressed by `(row, col)`.
///
/// Row 0 is black's back rank, row 7 is red's. A `Position` is always
/// on the board; constructors reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position, or `None` if it lies off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// Creates a position from literal coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are off the board.
    pub const fn at(row: u8, col: u8) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE, "position off board");
        Self { row, col }
    }

    /// Creates a position from signed coordinates, or `None` if off the board.
    pub fn from_signed(row: i32, col: i32) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    /// Row index (0-7).
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column index (0-7).
    pub fn col(self) -> u8 {
        self.col
    }

    /// Returns true for the dark, playable squares.
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// The square `steps` diagonal steps away in direction `(dr, dc)`.
    pub fn offset(self, (dr, dc): (i8, i8), steps: i8) -> Option<Self> {
        Self::from_signed(
            i32::from(self.row) + i32::from(dr) * i32::from(steps),
            i32::from(self.col) + i32::from(dc) * i32::from(steps),
        )
    }

    /// The square halfway between two positions two rows apart.
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            row: (self.row + other.row) / 2,
            col: (self.col + other.col) / 2,
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }

    /// The 32 dark squares in row-major order.
    pub fn dark_squares() -> impl Iterator<Item = Position> {
        Self::all().filter(|p| p.is_dark())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
