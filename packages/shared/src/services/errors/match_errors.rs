use crate::services::errors::board_errors::BoardError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    InvalidOpponent,
    InvalidPlayer,
    MatchAlreadyCompleted,
    NotYourTurn,
    NotParticipant,
    InvalidWinner(String),
    Board(BoardError),
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::InvalidOpponent => write!(f, "Cannot play against yourself"),
            MatchError::InvalidPlayer => write!(f, "Player ID cannot be empty"),
            MatchError::MatchAlreadyCompleted => write!(f, "Game is already finished"),
            MatchError::NotYourTurn => write!(f, "Not your turn"),
            MatchError::NotParticipant => write!(f, "Only participants can modify this game"),
            MatchError::InvalidWinner(player_id) => {
                write!(f, "Winner {} is not a participant of this game", player_id)
            }
            MatchError::Board(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MatchError {}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}
