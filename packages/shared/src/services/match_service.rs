use std::collections::HashMap;
use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::models::game_match::responses::MatchHistoryEntry;
use crate::models::game_match::{Match, Move};
use crate::models::player_stats::{PlayerStats, StatsUpdate};
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
use crate::repositories::match_repository::MatchRepository;
use crate::repositories::stats_repository::PlayerStatsRepository;
use crate::services::errors::match_service_errors::MatchServiceError;
use crate::services::match_controller::{self, Transition};

/// Hosts the match controller on top of the match and stats stores.
///
/// Mutations on one match run under that match's lock: load, transition,
/// save and the stats batch form a single critical section. Different
/// matches never contend. The registry only holds weak handles, so an entry
/// lives exactly as long as some request is using it.
pub struct MatchService {
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
    stats_repository: Arc<dyn PlayerStatsRepository + Send + Sync>,
    locks: Mutex<HashMap<String, Weak<Mutex<()>>>>,
}

/// Idempotency token for the stats batch of one completing transition.
fn stats_request_token(game: &Match) -> String {
    let name = format!("{}:{}", game.id, game.version);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
}

impl MatchService {
    pub fn new(
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        stats_repository: Arc<dyn PlayerStatsRepository + Send + Sync>,
    ) -> Self {
        MatchService {
            match_repository,
            stats_repository,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub async fn create_match(
        &self,
        initiator_id: &str,
        opponent_id: &str,
    ) -> Result<Match, MatchServiceError> {
        let game = match_controller::create_match(initiator_id, opponent_id)?;
        self.match_repository.create_match(&game).await?;
        info!(match_id = %game.id, first = %initiator_id, second = %opponent_id, "Match created");
        Ok(game)
    }

    pub async fn get_match(&self, match_id: &str) -> Result<Match, MatchServiceError> {
        if match_id.is_empty() {
            return Err(MatchServiceError::ValidationError(
                "Match ID cannot be empty".to_string(),
            ));
        }
        self.match_repository
            .get_match(match_id)
            .await?
            .ok_or(MatchServiceError::NotFound)
    }

    pub async fn get_moves(&self, match_id: &str) -> Result<Vec<Move>, MatchServiceError> {
        Ok(self.get_match(match_id).await?.moves)
    }

    pub async fn submit_move(
        &self,
        match_id: &str,
        player_id: &str,
        row: i64,
        col: i64,
    ) -> Result<Match, MatchServiceError> {
        let lock = self.match_lock(match_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.apply_move(match_id, player_id, row, col).await
        };
        self.release_lock(lock).await;
        result
    }

    /// Completes a match outside of normal play. `winner_id` of `None`
    /// records a draw.
    pub async fn complete_match(
        &self,
        match_id: &str,
        caller_id: &str,
        winner_id: Option<&str>,
    ) -> Result<Match, MatchServiceError> {
        let lock = self.match_lock(match_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.apply_completion(match_id, caller_id, winner_id).await
        };
        self.release_lock(lock).await;
        result
    }

    pub async fn get_player_stats(&self, player_id: &str) -> Result<PlayerStats, MatchServiceError> {
        if player_id.is_empty() {
            return Err(MatchServiceError::ValidationError(
                "Player ID cannot be empty".to_string(),
            ));
        }
        Ok(self.stats_repository.get_stats(player_id).await?)
    }

    /// Every match the player took part in, newest first.
    pub async fn match_history(
        &self,
        player_id: &str,
    ) -> Result<Vec<MatchHistoryEntry>, MatchServiceError> {
        let mut entries: Vec<MatchHistoryEntry> = self
            .match_repository
            .list_matches_for_player(player_id)
            .await?
            .iter()
            .filter_map(|game| MatchHistoryEntry::for_player(game, player_id))
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn apply_move(
        &self,
        match_id: &str,
        player_id: &str,
        row: i64,
        col: i64,
    ) -> Result<Match, MatchServiceError> {
        let current = self.get_match(match_id).await?;
        let transition =
            match_controller::submit_move(&current, player_id, row, col).map_err(|e| {
                debug!(match_id, player_id, row, col, "Move rejected: {}", e);
                e
            })?;
        debug!(match_id, player_id, row, col, "Move accepted");

        self.commit(&current, transition).await
    }

    async fn apply_completion(
        &self,
        match_id: &str,
        caller_id: &str,
        winner_id: Option<&str>,
    ) -> Result<Match, MatchServiceError> {
        let current = self.get_match(match_id).await?;
        let transition = match_controller::record_manual_completion(&current, caller_id, winner_id)
            .map_err(|e| {
                debug!(match_id, caller_id, "Manual completion rejected: {}", e);
                e
            })?;

        self.commit(&current, transition).await
    }

    async fn match_lock(&self, match_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        if let Some(lock) = locks.get(match_id).and_then(Weak::upgrade) {
            return lock;
        }
        let lock = Arc::new(Mutex::new(()));
        locks.insert(match_id.to_string(), Arc::downgrade(&lock));
        lock
    }

    /// Drops the caller's handle and prunes every entry nobody holds any
    /// more, including ones left behind by cancelled requests.
    async fn release_lock(&self, lock: Arc<Mutex<()>>) {
        drop(lock);
        let mut locks = self.locks.lock().await;
        locks.retain(|_, lock| lock.strong_count() > 0);
    }

    /// One retry under the same token; the store deduplicates a batch that
    /// already committed.
    async fn apply_stats(
        &self,
        request_token: &str,
        updates: &[StatsUpdate],
    ) -> Result<(), StatsRepositoryError> {
        match self
            .stats_repository
            .apply_results(request_token, updates)
            .await
        {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(request_token, "Stats batch failed, retrying: {}", err);
                self.stats_repository
                    .apply_results(request_token, updates)
                    .await
            }
        }
    }

    /// Saves the new state, then applies the stats batch. A failed batch
    /// writes `previous` back so no completion is left half-applied.
    async fn commit(
        &self,
        previous: &Match,
        transition: Transition,
    ) -> Result<Match, MatchServiceError> {
        let Transition {
            game,
            stats_updates,
        } = transition;

        self.match_repository
            .update_match(&game, previous.version)
            .await
            .map_err(|e| {
                error!(match_id = %game.id, "Failed to save match: {}", e);
                MatchServiceError::from(e)
            })?;

        if stats_updates.is_empty() {
            return Ok(game);
        }

        let request_token = stats_request_token(&game);
        if let Err(err) = self.apply_stats(&request_token, &stats_updates).await {
            error!(match_id = %game.id, "Failed to apply stats, restoring match: {}", err);
            let mut restored = previous.clone();
            restored.version = game.version + 1;
            return match self
                .match_repository
                .update_match(&restored, game.version)
                .await
            {
                Ok(()) => {
                    warn!(match_id = %game.id, "Match restored to its previous state");
                    Err(MatchServiceError::from(err))
                }
                Err(restore_err) => {
                    error!(match_id = %game.id, "Failed to restore match: {}", restore_err);
                    Err(MatchServiceError::Inconsistent {
                        match_id: game.id.clone(),
                        stats: err,
                        restore: restore_err,
                    })
                }
            };
        }

        info!(
            match_id = %game.id,
            winner = game.winner.as_deref().unwrap_or("none"),
            "Match completed"
        );
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board::{Cell, Side};
    use crate::models::game_match::responses::HistoryResult;
    use crate::models::game_match::MatchStatus;
    use crate::models::player_stats::GameOutcome;
    use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
    use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
    use crate::repositories::match_repository::MockMatchRepository;
    use crate::repositories::memory_repository::{
        InMemoryMatchRepository, InMemoryPlayerStatsRepository,
    };
    use crate::repositories::stats_repository::MockPlayerStatsRepository;
    use crate::services::errors::board_errors::BoardError;
    use crate::services::errors::match_errors::MatchError;

    const P1: &str = "player1";
    const P2: &str = "player2";

    fn create_service() -> (
        Arc<MatchService>,
        Arc<InMemoryMatchRepository>,
        Arc<InMemoryPlayerStatsRepository>,
    ) {
        let match_repository = Arc::new(InMemoryMatchRepository::new());
        let stats_repository = Arc::new(InMemoryPlayerStatsRepository::new());
        let service = Arc::new(MatchService::new(
            match_repository.clone(),
            stats_repository.clone(),
        ));
        (service, match_repository, stats_repository)
    }

    async fn play(service: &MatchService, match_id: &str, moves: &[(&str, i64, i64)]) -> Match {
        let mut game = service.get_match(match_id).await.unwrap();
        for (player, row, col) in moves {
            game = service
                .submit_move(match_id, player, *row, *col)
                .await
                .unwrap();
        }
        game
    }

    fn assert_stats(stats: &PlayerStats, won: u32, lost: u32, drawn: u32) {
        assert_eq!(stats.games_won, won);
        assert_eq!(stats.games_lost, lost);
        assert_eq!(stats.games_drawn, drawn);
        assert_eq!(stats.games_played, won + lost + drawn);
    }

    #[tokio::test]
    async fn test_top_row_win_updates_stats() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();

        let game = play(
            &service,
            &game.id,
            &[(P1, 0, 0), (P2, 1, 1), (P1, 0, 1), (P2, 2, 2), (P1, 0, 2)],
        )
        .await;

        assert_eq!(game.status, MatchStatus::Completed);
        assert_eq!(game.winner.as_deref(), Some(P1));
        assert_stats(&service.get_player_stats(P1).await.unwrap(), 1, 0, 0);
        assert_stats(&service.get_player_stats(P2).await.unwrap(), 0, 1, 0);
    }

    #[tokio::test]
    async fn test_draw_updates_both_players() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();

        // X O X / X O O / O X X
        let game = play(
            &service,
            &game.id,
            &[
                (P1, 0, 0),
                (P2, 0, 1),
                (P1, 0, 2),
                (P2, 1, 1),
                (P1, 1, 0),
                (P2, 1, 2),
                (P1, 2, 1),
                (P2, 2, 0),
                (P1, 2, 2),
            ],
        )
        .await;

        assert_eq!(game.status, MatchStatus::Completed);
        assert!(game.winner.is_none());
        assert_stats(&service.get_player_stats(P1).await.unwrap(), 0, 0, 1);
        assert_stats(&service.get_player_stats(P2).await.unwrap(), 0, 0, 1);
    }

    #[tokio::test]
    async fn test_rejected_moves_leave_match_unchanged() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();
        let game = play(&service, &game.id, &[(P1, 1, 1)]).await;

        let wrong_turn = service.submit_move(&game.id, P1, 0, 0).await;
        let occupied = service.submit_move(&game.id, P2, 1, 1).await;
        let out_of_range = service.submit_move(&game.id, P2, 3, 0).await;

        assert!(matches!(
            wrong_turn,
            Err(MatchServiceError::Match(MatchError::NotYourTurn))
        ));
        assert!(matches!(
            occupied,
            Err(MatchServiceError::Match(MatchError::Board(
                BoardError::CellOccupied { row: 1, col: 1 }
            )))
        ));
        assert!(matches!(
            out_of_range,
            Err(MatchServiceError::Match(MatchError::Board(
                BoardError::OutOfRange { row: 3, col: 0 }
            )))
        ));
        assert_eq!(service.get_match(&game.id).await.unwrap(), game);
    }

    #[tokio::test]
    async fn test_completed_match_rejects_moves() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();
        let game = play(
            &service,
            &game.id,
            &[(P1, 0, 0), (P2, 1, 1), (P1, 0, 1), (P2, 2, 2), (P1, 0, 2)],
        )
        .await;

        let result = service.submit_move(&game.id, P2, 2, 0).await;

        assert!(matches!(
            result,
            Err(MatchServiceError::Match(MatchError::MatchAlreadyCompleted))
        ));
        assert_stats(&service.get_player_stats(P1).await.unwrap(), 1, 0, 0);
    }

    #[tokio::test]
    async fn test_create_match_against_self() {
        let (service, _, _) = create_service();

        let result = service.create_match(P1, P1).await;

        assert!(matches!(
            result,
            Err(MatchServiceError::Match(MatchError::InvalidOpponent))
        ));
    }

    #[tokio::test]
    async fn test_unknown_match() {
        let (service, _, _) = create_service();

        assert!(matches!(
            service.get_match("missing").await,
            Err(MatchServiceError::NotFound)
        ));
        assert!(matches!(
            service.submit_move("missing", P1, 0, 0).await,
            Err(MatchServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_reads_are_idempotent() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();
        play(&service, &game.id, &[(P1, 2, 2)]).await;

        assert_eq!(
            service.get_match(&game.id).await.unwrap(),
            service.get_match(&game.id).await.unwrap()
        );
        assert_eq!(
            service.get_moves(&game.id).await.unwrap(),
            service.get_moves(&game.id).await.unwrap()
        );
        assert_eq!(
            service.get_player_stats(P1).await.unwrap(),
            service.get_player_stats(P1).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_move_log_is_append_only() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();

        let mut previous: Vec<Move> = vec![];
        for (player, row, col) in [(P1, 0, 0), (P2, 2, 2), (P1, 1, 0)] {
            service.submit_move(&game.id, player, row, col).await.unwrap();
            let moves = service.get_moves(&game.id).await.unwrap();
            assert_eq!(moves.len(), previous.len() + 1);
            assert_eq!(&moves[..previous.len()], &previous[..]);
            previous = moves;
        }

        let sequences: Vec<u32> = previous.iter().map(|m| m.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert_eq!(previous[1].side, Side::Second);
    }

    #[tokio::test]
    async fn test_concurrent_moves_from_same_player() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();

        let first = {
            let service = service.clone();
            let id = game.id.clone();
            tokio::spawn(async move { service.submit_move(&id, P1, 0, 0).await })
        };
        let second = {
            let service = service.clone();
            let id = game.id.clone();
            tokio::spawn(async move { service.submit_move(&id, P1, 2, 2).await })
        };
        let results = [first.await.unwrap(), second.await.unwrap()];

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(MatchServiceError::Match(MatchError::NotYourTurn))))
            .count();
        assert_eq!(succeeded, 1);
        assert_eq!(rejected, 1);

        let stored = service.get_match(&game.id).await.unwrap();
        assert_eq!(stored.moves.len(), 1);
        assert_eq!(stored.board.marked_count(), 1);
        assert_eq!(stored.side_to_move, Side::Second);
    }

    #[tokio::test]
    async fn test_concurrent_final_move_and_resignation_apply_stats_once() {
        for _ in 0..20 {
            let (service, _, _) = create_service();
            let game = service.create_match(P1, P2).await.unwrap();
            play(
                &service,
                &game.id,
                &[(P1, 0, 0), (P2, 1, 1), (P1, 0, 1), (P2, 2, 2)],
            )
            .await;

            let winning_move = {
                let service = service.clone();
                let id = game.id.clone();
                tokio::spawn(async move { service.submit_move(&id, P1, 0, 2).await })
            };
            let resignation = {
                let service = service.clone();
                let id = game.id.clone();
                tokio::spawn(async move { service.complete_match(&id, P1, Some(P2)).await })
            };
            let results = [winning_move.await.unwrap(), resignation.await.unwrap()];

            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert!(results.iter().any(|r| matches!(
                r,
                Err(MatchServiceError::Match(MatchError::MatchAlreadyCompleted))
            )));

            let p1 = service.get_player_stats(P1).await.unwrap();
            let p2 = service.get_player_stats(P2).await.unwrap();
            assert_eq!(p1.games_played, 1);
            assert_eq!(p2.games_played, 1);
            assert_eq!(p1.games_won + p2.games_won, 1);
            assert_eq!(p1.games_lost + p2.games_lost, 1);
        }
    }

    #[tokio::test]
    async fn test_manual_completion() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();

        let completed = service.complete_match(&game.id, P2, None).await.unwrap();

        assert_eq!(completed.status, MatchStatus::Completed);
        assert!(completed.winner.is_none());
        assert_stats(&service.get_player_stats(P1).await.unwrap(), 0, 0, 1);
        assert_stats(&service.get_player_stats(P2).await.unwrap(), 0, 0, 1);

        let again = service.complete_match(&game.id, P1, Some(P1)).await;
        assert!(matches!(
            again,
            Err(MatchServiceError::Match(MatchError::MatchAlreadyCompleted))
        ));
        assert_stats(&service.get_player_stats(P1).await.unwrap(), 0, 0, 1);
    }

    #[tokio::test]
    async fn test_manual_completion_by_outsider() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();

        let result = service.complete_match(&game.id, "stranger", Some(P1)).await;

        assert!(matches!(
            result,
            Err(MatchServiceError::Match(MatchError::NotParticipant))
        ));
        assert_eq!(service.get_match(&game.id).await.unwrap(), game);
    }

    #[tokio::test]
    async fn test_stats_failure_restores_match() {
        let match_repository = Arc::new(InMemoryMatchRepository::new());
        let mut stats_repository = MockPlayerStatsRepository::new();
        stats_repository
            .expect_apply_results()
            .times(2)
            .returning(|_, _| Err(StatsRepositoryError::DynamoDb("throttled".to_string())));
        let service = MatchService::new(match_repository.clone(), Arc::new(stats_repository));
        let game = service.create_match(P1, P2).await.unwrap();
        let before = play(
            &service,
            &game.id,
            &[(P1, 0, 0), (P2, 1, 1), (P1, 0, 1), (P2, 2, 2)],
        )
        .await;

        let result = service.submit_move(&game.id, P1, 0, 2).await;

        assert!(matches!(result, Err(MatchServiceError::StatsError(_))));
        let stored = service.get_match(&game.id).await.unwrap();
        assert_eq!(stored.status, MatchStatus::Ongoing);
        assert_eq!(stored.board, before.board);
        assert_eq!(stored.moves, before.moves);
        assert_eq!(stored.board.cell(0, 2), Some(Cell::Empty));
        assert!(stored.version > before.version);
    }

    #[tokio::test]
    async fn test_stats_batch_is_retried_with_same_token() {
        let tokens = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorded = tokens.clone();
        let mut attempts = 0;
        let mut stats_repository = MockPlayerStatsRepository::new();
        stats_repository
            .expect_apply_results()
            .times(2)
            .returning(move |token, _| {
                recorded.lock().unwrap().push(token.to_string());
                attempts += 1;
                if attempts == 1 {
                    Err(StatsRepositoryError::DynamoDb("timed out".to_string()))
                } else {
                    Ok(())
                }
            });
        let service = MatchService::new(
            Arc::new(InMemoryMatchRepository::new()),
            Arc::new(stats_repository),
        );
        let game = service.create_match(P1, P2).await.unwrap();

        let completed = service.complete_match(&game.id, P1, Some(P2)).await.unwrap();

        assert_eq!(completed.status, MatchStatus::Completed);
        assert_eq!(service.get_match(&game.id).await.unwrap(), completed);
        let tokens = tokens.lock().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], tokens[1]);
    }

    #[tokio::test]
    async fn test_failed_restore_is_reported_as_inconsistent() {
        let mut stored = Match::new(P1, P2);
        for (player, row, col) in [(P1, 0, 0), (P2, 1, 1), (P1, 0, 1), (P2, 2, 2)] {
            stored = match_controller::submit_move(&stored, player, row, col)
                .unwrap()
                .game;
        }
        let loaded = stored.clone();
        let mut saves = 0;
        let mut match_repository = MockMatchRepository::new();
        match_repository
            .expect_get_match()
            .returning(move |_| Ok(Some(loaded.clone())));
        match_repository
            .expect_update_match()
            .times(2)
            .returning(move |_, _| {
                saves += 1;
                if saves == 1 {
                    Ok(())
                } else {
                    Err(MatchRepositoryError::DynamoDb("unavailable".to_string()))
                }
            });
        let mut stats_repository = MockPlayerStatsRepository::new();
        stats_repository
            .expect_apply_results()
            .returning(|_, _| Err(StatsRepositoryError::DynamoDb("throttled".to_string())));
        let service = MatchService::new(Arc::new(match_repository), Arc::new(stats_repository));

        let result = service.submit_move(&stored.id, P1, 0, 2).await;

        match result {
            Err(MatchServiceError::Inconsistent { match_id, .. }) => {
                assert_eq!(match_id, stored.id)
            }
            other => panic!("expected an inconsistent match error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lock_registry_is_emptied_after_each_request() {
        let (service, _, _) = create_service();

        for n in 0..1000 {
            let result = service
                .submit_move(&format!("missing-{}", n), P1, 0, 0)
                .await;
            assert!(matches!(result, Err(MatchServiceError::NotFound)));
        }
        let game = service.create_match(P1, P2).await.unwrap();
        service.submit_move(&game.id, P1, 1, 1).await.unwrap();
        let rejected = service.complete_match(&game.id, "stranger", None).await;

        assert!(rejected.is_err());
        assert!(service.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_lock() {
        let (service, _, _) = create_service();
        let game = service.create_match(P1, P2).await.unwrap();

        let held = service.match_lock(&game.id).await;
        let again = service.match_lock(&game.id).await;
        assert!(Arc::ptr_eq(&held, &again));

        service.release_lock(again).await;
        assert_eq!(service.locks.lock().await.len(), 1);
        service.release_lock(held).await;
        assert!(service.locks.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_version_conflict_is_reported() {
        let game = Match::new(P1, P2);
        let stored = game.clone();
        let mut match_repository = MockMatchRepository::new();
        match_repository
            .expect_get_match()
            .returning(move |_| Ok(Some(stored.clone())));
        match_repository
            .expect_update_match()
            .returning(|_, _| Err(MatchRepositoryError::VersionConflict));
        let service = MatchService::new(
            Arc::new(match_repository),
            Arc::new(InMemoryPlayerStatsRepository::new()),
        );

        let result = service.submit_move(&game.id, P1, 0, 0).await;

        assert!(matches!(result, Err(MatchServiceError::Conflict)));
    }

    #[tokio::test]
    async fn test_match_history() {
        let (service, _, _) = create_service();
        let won = service.create_match(P1, P2).await.unwrap();
        play(
            &service,
            &won.id,
            &[(P1, 0, 0), (P2, 1, 1), (P1, 0, 1), (P2, 2, 2), (P1, 0, 2)],
        )
        .await;
        let ongoing = service.create_match("player3", P1).await.unwrap();
        service.create_match(P2, "player3").await.unwrap();

        let history = service.match_history(P1).await.unwrap();

        assert_eq!(history.len(), 2);
        assert!(history[0].created_at >= history[1].created_at);
        let won_entry = history.iter().find(|e| e.id == won.id).unwrap();
        assert_eq!(won_entry.result, HistoryResult::Won);
        assert_eq!(won_entry.opponent_id, P2);
        let ongoing_entry = history.iter().find(|e| e.id == ongoing.id).unwrap();
        assert_eq!(ongoing_entry.result, HistoryResult::Ongoing);
        assert_eq!(ongoing_entry.opponent_id, "player3");

        let p2_history = service.match_history(P2).await.unwrap();
        let lost_entry = p2_history.iter().find(|e| e.id == won.id).unwrap();
        assert_eq!(lost_entry.result, HistoryResult::Lost);
    }

    #[tokio::test]
    async fn test_stats_for_new_player_are_zeroed() {
        let (service, _, stats_repository) = create_service();

        let stats = service.get_player_stats("newcomer").await.unwrap();

        assert_stats(&stats, 0, 0, 0);
        stats_repository
            .apply_result("newcomer", GameOutcome::Won)
            .await
            .unwrap();
        assert_stats(&service.get_player_stats("newcomer").await.unwrap(), 1, 0, 0);
    }
}
