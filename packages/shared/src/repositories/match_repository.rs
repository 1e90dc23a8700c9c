use crate::models::game_match::Match;
use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde_dynamo::{from_item, from_items, to_item};
use tracing::debug;

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbMatchRepository {
    pub client: Client,
    pub table_name: String,
}

/// Index keyed on `player_first_id`, projecting all attributes.
pub const GSI_MATCH_BY_FIRST_PLAYER: &str = "GSI_MatchByFirstPlayer";
/// Index keyed on `player_second_id`, projecting all attributes.
pub const GSI_MATCH_BY_SECOND_PLAYER: &str = "GSI_MatchBySecondPlayer";

impl DynamoDbMatchRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    async fn query_player_index(
        &self,
        index_name: &str,
        key_attribute: &str,
        player_id: &str,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        let mut matches = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(index_name)
                .key_condition_expression("#player = :player")
                .expression_attribute_names("#player", key_attribute)
                .expression_attribute_values(":player", AttributeValue::S(player_id.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| MatchRepositoryError::DynamoDb(e.to_string()))?;

            if let Some(items) = output.items {
                let page: Vec<Match> = from_items(items)
                    .map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;
                matches.extend(page);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        debug!(index_name, player_id, count = matches.len(), "Queried matches by player");
        Ok(matches)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn create_match(&self, game: &Match) -> Result<(), MatchRepositoryError>;

    async fn get_match(&self, match_id: &str) -> Result<Option<Match>, MatchRepositoryError>;

    /// Replaces the stored match only if its version still equals
    /// `expected_version`.
    async fn update_match(
        &self,
        game: &Match,
        expected_version: u64,
    ) -> Result<(), MatchRepositoryError>;

    async fn list_matches_for_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<Match>, MatchRepositoryError>;
}

#[async_trait]
impl MatchRepository for DynamoDbMatchRepository {
    async fn create_match(&self, game: &Match) -> Result<(), MatchRepositoryError> {
        let item =
            to_item(game).map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    Err(MatchRepositoryError::AlreadyExists)
                } else {
                    Err(MatchRepositoryError::DynamoDb(service_error.to_string()))
                }
            }
        }
    }

    async fn get_match(&self, match_id: &str) -> Result<Option<Match>, MatchRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(match_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| MatchRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(item) => {
                let game: Match = from_item(item)
                    .map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;
                Ok(Some(game))
            }
            None => Ok(None),
        }
    }

    async fn update_match(
        &self,
        game: &Match,
        expected_version: u64,
    ) -> Result<(), MatchRepositoryError> {
        let item =
            to_item(game).map_err(|e| MatchRepositoryError::Serialization(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_exists(id) AND version = :expected")
            .expression_attribute_values(
                ":expected",
                AttributeValue::N(expected_version.to_string()),
            )
            .send()
            .await;

        match result {
            Ok(_) => {
                debug!(match_id = %game.id, version = game.version, "Match updated");
                Ok(())
            }
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    Err(MatchRepositoryError::VersionConflict)
                } else {
                    Err(MatchRepositoryError::DynamoDb(service_error.to_string()))
                }
            }
        }
    }

    async fn list_matches_for_player(
        &self,
        player_id: &str,
    ) -> Result<Vec<Match>, MatchRepositoryError> {
        // A match never pairs a player with themself, so the two index
        // results are disjoint
        let mut matches = self
            .query_player_index(GSI_MATCH_BY_FIRST_PLAYER, "player_first_id", player_id)
            .await?;
        matches.extend(
            self.query_player_index(GSI_MATCH_BY_SECOND_PLAYER, "player_second_id", player_id)
                .await?,
        );
        Ok(matches)
    }
}
