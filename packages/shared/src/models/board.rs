use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;

/// Turn identity within a single match. `First` always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "X")]
    First,
    #[serde(rename = "O")]
    Second,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// A single grid cell. Serialized as `null`, `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<Side>", into = "Option<Side>")]
pub enum Cell {
    #[default]
    Empty,
    Mark(Side),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Option<Side>> for Cell {
    fn from(value: Option<Side>) -> Self {
        match value {
            Some(side) => Cell::Mark(side),
            None => Cell::Empty,
        }
    }
}

impl From<Cell> for Option<Side> {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Mark(side) => Some(side),
            Cell::Empty => None,
        }
    }
}

/// Row-major 3x3 grid. Only the board engine produces modified copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    pub(crate) fn with_mark(mut self, row: usize, col: usize, side: Side) -> Self {
        self.cells[row][col] = Cell::Mark(side);
        self
    }
}
