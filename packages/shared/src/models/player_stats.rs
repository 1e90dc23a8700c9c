use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Won,
    Lost,
    Drawn,
}

impl GameOutcome {
    /// Name of the counter this outcome increments.
    pub fn counter_attribute(self) -> &'static str {
        match self {
            GameOutcome::Won => "games_won",
            GameOutcome::Lost => "games_lost",
            GameOutcome::Drawn => "games_drawn",
        }
    }
}

/// One half of the paired update issued when a match completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsUpdate {
    pub player_id: String,
    pub outcome: GameOutcome,
}

impl StatsUpdate {
    pub fn new(player_id: &str, outcome: GameOutcome) -> Self {
        StatsUpdate {
            player_id: player_id.to_string(),
            outcome,
        }
    }
}

/// Invariant: `games_played == games_won + games_lost + games_drawn`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: String,
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub games_lost: u32,
    #[serde(default)]
    pub games_drawn: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PlayerStats {
    pub fn new(player_id: &str) -> Self {
        PlayerStats {
            player_id: player_id.to_string(),
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            games_drawn: 0,
            updated_at: None,
        }
    }

    pub fn apply(&mut self, outcome: GameOutcome) {
        self.games_played += 1;
        match outcome {
            GameOutcome::Won => self.games_won += 1,
            GameOutcome::Lost => self.games_lost += 1,
            GameOutcome::Drawn => self.games_drawn += 1,
        }
        self.updated_at = Some(Utc::now());
    }

    /// Percentage of games won, rounded to two decimals.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let rate = f64::from(self.games_won) / f64::from(self.games_played) * 100.0;
        (rate * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub player_id: String,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub games_drawn: u32,
    pub win_rate: f64,
}

impl From<PlayerStats> for PlayerStatsResponse {
    fn from(stats: PlayerStats) -> Self {
        let win_rate = stats.win_rate();
        PlayerStatsResponse {
            player_id: stats.player_id,
            games_played: stats.games_played,
            games_won: stats.games_won,
            games_lost: stats.games_lost,
            games_drawn: stats.games_drawn,
            win_rate,
        }
    }
}
