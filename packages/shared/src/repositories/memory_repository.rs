use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::game_match::Match;
use crate::models::player_stats::{GameOutcome, PlayerStats, StatsUpdate};
use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
use crate::repositories::match_repository::MatchRepository;
use crate::repositories::stats_repository::PlayerStatsRepository;

/// Process-local match store, used for local runs and tests.
#[derive(Clone, Default)]
pub struct InMemoryMatchRepository {
    matches: Arc<RwLock<HashMap<String, Match>>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn create_match(&self, game: &Match) -> Result<(), MatchRepositoryError> {
        let mut matches = self.matches.write().await;
        if matches.contains_key(&game.id) {
            return Err(MatchRepositoryError::AlreadyExists);
        }
        matches.insert(game.id.clone(), game.clone());
        Ok(())
    }

    async fn get_match(&self, match_id: &str) -> Result<Option<Match>, MatchRepositoryError> {
        let matches = self.matches.read().await;
        Ok(matches.get(match_id).cloned())
    }

    async fn update_match(
        &self,
        game: &Match,
        expected_version: u64,
    ) -> Result<(), MatchRepositoryError> {
        let mut matches = self.matches.write().await;
        let stored = matches
            .get_mut(&game.id)
            .ok_or(MatchRepositoryError::NotFound)?;
        if stored.version != expected_version {
            return Err(MatchRepositoryError::VersionConflict);
        }
        *stored = game.clone();
        Ok(())
    }

    async fn list_matches_for_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        let matches = self.matches.read().await;
        Ok(matches
            .values()
            .filter(|game| game.is_participant(player_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct StatsStore {
    stats: HashMap<String, PlayerStats>,
    applied_tokens: HashSet<String>,
}

#[derive(Clone, Default)]
pub struct InMemoryPlayerStatsRepository {
    store: Arc<RwLock<StatsStore>>,
}

impl InMemoryPlayerStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStatsRepository for InMemoryPlayerStatsRepository {
    async fn get_stats(&self, player_id: &str) -> Result<PlayerStats, StatsRepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .stats
            .get(player_id)
            .cloned()
            .unwrap_or_else(|| PlayerStats::new(player_id)))
    }

    async fn apply_result(
        &self,
        player_id: &str,
        outcome: GameOutcome,
    ) -> Result<(), StatsRepositoryError> {
        let request_token = Uuid::new_v4().to_string();
        self.apply_results(&request_token, &[StatsUpdate::new(player_id, outcome)])
            .await
    }

    async fn apply_results(
        &self,
        request_token: &str,
        updates: &[StatsUpdate],
    ) -> Result<(), StatsRepositoryError> {
        // One write guard for the whole batch keeps paired updates indivisible
        let mut store = self.store.write().await;
        if !store.applied_tokens.insert(request_token.to_string()) {
            return Ok(());
        }
        for update in updates {
            store
                .stats
                .entry(update.player_id.clone())
                .or_insert_with(|| PlayerStats::new(&update.player_id))
                .apply(update.outcome);
        }
        Ok(())
    }
}
