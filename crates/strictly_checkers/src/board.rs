//! The 8x8 checkers board.
//!
//! A [`Board`] is a plain `Copy` value. Nothing here knows the rules of
//! movement; it only stores and queries cells. Every change produces a
//! new board.

use crate::position::{BOARD_SIZE, Position};
use crate::types::{Cell, Side};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Rows of initial black men.
const BLACK_HOME_ROWS: std::ops::Range<u8> = 0..3;
/// Rows of initial red men.
const RED_HOME_ROWS: std::ops::Range<u8> = 5..8;

/// Errors building a board from explicit contents.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardError {
    /// A piece was placed on a light (unplayable) square.
    #[display("Piece placed on light square {}", _0)]
    LightSquare(Position),
    /// A text row did not have exactly eight cells.
    #[display("Row {} has {} cells, expected 8", row, len)]
    RowLength {
        /// Row index.
        row: usize,
        /// Number of cells found.
        len: usize,
    },
    /// A text row contained an unknown symbol.
    #[display("Unknown symbol {:?} in row {}", symbol, row)]
    UnknownSymbol {
        /// Row index.
        row: usize,
        /// The offending character.
        symbol: char,
    },
}

impl std::error::Error for BoardError {}

/// 8x8 grid of cells, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Standard setup: twelve men per side on the dark squares of the
    /// three back rows (black on rows 0-2, red on rows 5-7).
    #[instrument]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for pos in Position::dark_squares() {
            if BLACK_HOME_ROWS.contains(&pos.row()) {
                board.set(pos, Cell::BlackMan);
            } else if RED_HOME_ROWS.contains(&pos.row()) {
                board.set(pos, Cell::RedMan);
            }
        }
        board
    }

    /// Builds a board holding exactly the given pieces.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::LightSquare`] if any piece sits on a light square.
    pub fn with_pieces(pieces: &[(Position, Cell)]) -> Result<Self, BoardError> {
        pieces
            .iter()
            .try_fold(Self::empty(), |board, &(pos, cell)| board.place(pos, cell))
    }

    /// Parses eight text rows in the [`Display`](std::fmt::Display) format.
    ///
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str; BOARD_SIZE as usize]) -> Result<Self, BoardError> {
        let mut board = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE as usize {
                return Err(BoardError::RowLength {
                    row,
                    len: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                let cell =
                    Cell::from_symbol(symbol).ok_or(BoardError::UnknownSymbol { row, symbol })?;
                // row and col are both < 8 here
                let pos = Position::at(row as u8, col as u8);
                board = board.place(pos, cell)?;
            }
        }
        Ok(board)
    }

    /// Returns a copy with `cell` at `pos`.
    ///
    /// # Errors
    ///
    /// Rejects pieces on light squares. Clearing a light square is allowed.
    pub fn place(mut self, pos: Position, cell: Cell) -> Result<Self, BoardError> {
        if !cell.is_empty() && !pos.is_dark() {
            return Err(BoardError::LightSquare(pos));
        }
        self.set(pos, cell);
        Ok(self)
    }

    /// The cell at `pos`.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.row() as usize][pos.col() as usize]
    }

    /// The cell at `(row, col)`, or `None` off the board.
    pub fn piece_at(&self, row: u8, col: u8) -> Option<Cell> {
        Position::new(row, col).map(|pos| self.get(pos))
    }

    /// Returns true if `pos` is empty.
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_empty()
    }

    /// Overwrites one cell. Only used on private copies.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row() as usize][pos.col() as usize] = cell;
    }

    /// All occupied squares owned by `side`, row-major.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::all()
            .map(|pos| (pos, self.get(pos)))
            .filter(move |(_, cell)| cell.belongs_to(side))
    }

    /// Number of pieces (men and kings) owned by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    /// Number of kings owned by `side`.
    pub fn kings(&self, side: Side) -> usize {
        self.pieces(side).filter(|(_, cell)| cell.is_king()).count()
    }

    /// Rows of cells, for rendering.
    pub fn rows(&self) -> &[[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pos in Position::all() {
            let symbol = if pos.is_dark() {
                self.get(pos).symbol()
            } else {
                '.'
            };
            write!(f, "{}", symbol)?;
            if pos.col() == BOARD_SIZE - 1 && pos.row() < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
