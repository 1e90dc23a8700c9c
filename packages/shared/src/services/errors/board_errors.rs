#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    OutOfRange { row: i64, col: i64 },
    CellOccupied { row: usize, col: usize },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::OutOfRange { row, col } => {
                write!(f, "Position ({}, {}) is outside the board", row, col)
            }
            BoardError::CellOccupied { row, col } => {
                write!(f, "Position ({}, {}) is already taken", row, col)
            }
        }
    }
}

impl std::error::Error for BoardError {}
