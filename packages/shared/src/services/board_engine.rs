use crate::models::board::{Board, Cell, Side, BOARD_SIZE};
use crate::services::errors::board_errors::BoardError;

/// How a finished board ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Won(Side),
    Draw,
}

type Line = [(usize, usize); 3];

/// Evaluation order: rows top to bottom, columns left to right, main
/// diagonal, anti-diagonal.
const LINES: [Line; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

fn to_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok().filter(|v| *v < BOARD_SIZE)
}

/// Places `side`'s mark at (`row`, `col`) and returns the new board.
/// The input board is left untouched.
pub fn apply(board: &Board, row: i64, col: i64, side: Side) -> Result<Board, BoardError> {
    let (r, c) = match (to_index(row), to_index(col)) {
        (Some(r), Some(c)) => (r, c),
        _ => return Err(BoardError::OutOfRange { row, col }),
    };

    match board.cell(r, c) {
        Some(Cell::Empty) => Ok(board.with_mark(r, c, side)),
        Some(Cell::Mark(_)) => Err(BoardError::CellOccupied { row: r, col: c }),
        None => Err(BoardError::OutOfRange { row, col }),
    }
}

/// First line in `LINES` order holding three identical marks.
pub fn winner(board: &Board) -> Option<Side> {
    LINES.iter().find_map(|[a, b, c]| {
        match (board.cell(a.0, a.1), board.cell(b.0, b.1), board.cell(c.0, c.1)) {
            (Some(Cell::Mark(x)), Some(Cell::Mark(y)), Some(Cell::Mark(z))) if x == y && y == z => {
                Some(x)
            }
            _ => None,
        }
    })
}

pub fn is_full(board: &Board) -> bool {
    board.rows().iter().flatten().all(|cell| !cell.is_empty())
}

/// Winner takes precedence over a full board.
pub fn terminal_state(board: &Board) -> Option<Terminal> {
    if let Some(side) = winner(board) {
        return Some(Terminal::Won(side));
    }
    if is_full(board) {
        return Some(Terminal::Draw);
    }
    None
}
