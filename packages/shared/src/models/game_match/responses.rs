use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Match, MatchStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryResult {
    Ongoing,
    Won,
    Lost,
    Draw,
}

/// A match as seen from one participant's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryEntry {
    pub id: String,
    pub player1_id: String,
    pub player2_id: String,
    pub winner_id: Option<String>,
    pub opponent_id: String,
    pub result: HistoryResult,
    pub created_at: DateTime<Utc>,
}

impl MatchHistoryEntry {
    /// Returns `None` when `player_id` did not take part in the match.
    pub fn for_player(game: &Match, player_id: &str) -> Option<Self> {
        let opponent_id = game.opponent_of(player_id)?.to_string();
        let result = match (&game.status, game.winner.as_deref()) {
            (MatchStatus::Ongoing, _) => HistoryResult::Ongoing,
            (MatchStatus::Completed, None) => HistoryResult::Draw,
            (MatchStatus::Completed, Some(winner)) if winner == player_id => HistoryResult::Won,
            (MatchStatus::Completed, Some(_)) => HistoryResult::Lost,
        };

        Some(MatchHistoryEntry {
            id: game.id.clone(),
            player1_id: game.player_first_id.clone(),
            player2_id: game.player_second_id.clone(),
            winner_id: game.winner.clone(),
            opponent_id,
            result,
            created_at: game.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
