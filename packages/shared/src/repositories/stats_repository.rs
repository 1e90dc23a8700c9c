use crate::models::player_stats::{GameOutcome, PlayerStats, StatsUpdate};
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, TransactWriteItem, Update};
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use serde_dynamo::from_item;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

pub struct DynamoDbPlayerStatsRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbPlayerStatsRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    fn counter_update(&self, update: &StatsUpdate) -> Result<TransactWriteItem, StatsRepositoryError> {
        let now = Utc::now().to_rfc3339();
        let item = Update::builder()
            .table_name(&self.table_name)
            .key("player_id", AttributeValue::S(update.player_id.clone()))
            .update_expression("ADD games_played :one, #outcome :one SET updated_at = :now")
            .expression_attribute_names("#outcome", update.outcome.counter_attribute())
            .expression_attribute_values(":one", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":now", AttributeValue::S(now))
            .build()
            .map_err(|e| StatsRepositoryError::DynamoDb(e.to_string()))?;

        Ok(TransactWriteItem::builder().update(item).build())
    }
}

/// Stats records are created lazily: unknown players read as zeroed stats
/// and the first applied result creates the record.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlayerStatsRepository: Send + Sync {
    async fn get_stats(&self, player_id: &str) -> Result<PlayerStats, StatsRepositoryError>;

    async fn apply_result(
        &self,
        player_id: &str,
        outcome: GameOutcome,
    ) -> Result<(), StatsRepositoryError>;

    /// Applies every update or none of them. Repeating a call with the same
    /// `request_token` applies the batch at most once.
    async fn apply_results(
        &self,
        request_token: &str,
        updates: &[StatsUpdate],
    ) -> Result<(), StatsRepositoryError>;
}

#[async_trait]
impl PlayerStatsRepository for DynamoDbPlayerStatsRepository {
    async fn get_stats(&self, player_id: &str) -> Result<PlayerStats, StatsRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("player_id", AttributeValue::S(player_id.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| StatsRepositoryError::DynamoDb(e.to_string()))?;

        match output.item {
            Some(item) => {
                from_item(item).map_err(|e| StatsRepositoryError::Serialization(e.to_string()))
            }
            None => Ok(PlayerStats::new(player_id)),
        }
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
        if updates.is_empty() {
            return Ok(());
        }

        let items = updates
            .iter()
            .map(|update| self.counter_update(update))
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .transact_write_items()
            .set_transact_items(Some(items))
            .client_request_token(request_token)
            .send()
            .await
            .map_err(|e| StatsRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }
}
