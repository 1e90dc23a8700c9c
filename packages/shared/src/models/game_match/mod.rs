pub mod requests;
pub mod responses;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::board::{Board, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Ongoing,
    Completed,
}

/// One accepted placement. Never updated once appended to a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub match_id: String,
    pub player_id: String,
    pub side: Side,
    pub row: u8,
    pub col: u8,
    pub sequence: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub player_first_id: String,
    pub player_second_id: String,
    pub board: Board,
    pub side_to_move: Side,
    pub status: MatchStatus,
    pub winner: Option<String>,
    pub moves: Vec<Move>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u64,
}

impl Match {
    pub fn new(player_first_id: &str, player_second_id: &str) -> Self {
        let now = Utc::now();
        Match {
            id: Uuid::new_v4().to_string(),
            player_first_id: player_first_id.to_string(),
            player_second_id: player_second_id.to_string(),
            board: Board::new(),
            side_to_move: Side::First,
            status: MatchStatus::Ongoing,
            winner: None,
            moves: vec![],
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    pub fn player_for(&self, side: Side) -> &str {
        match side {
            Side::First => &self.player_first_id,
            Side::Second => &self.player_second_id,
        }
    }

    pub fn side_of(&self, player_id: &str) -> Option<Side> {
        if player_id == self.player_first_id {
            Some(Side::First)
        } else if player_id == self.player_second_id {
            Some(Side::Second)
        } else {
            None
        }
    }

    pub fn player_to_move(&self) -> &str {
        self.player_for(self.side_to_move)
    }

    pub fn opponent_of(&self, player_id: &str) -> Option<&str> {
        self.side_of(player_id)
            .map(|side| self.player_for(side.opponent()))
    }

    pub fn is_participant(&self, player_id: &str) -> bool {
        self.side_of(player_id).is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }
}
