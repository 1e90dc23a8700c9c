use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use config::{Config, StorageBackend};
use shared::repositories::match_repository::{DynamoDbMatchRepository, MatchRepository};
use shared::repositories::memory_repository::{
    InMemoryMatchRepository, InMemoryPlayerStatsRepository,
};
use shared::repositories::stats_repository::{
    DynamoDbPlayerStatsRepository, PlayerStatsRepository,
};
use shared::services::auth_service::AuthService;
use shared::services::match_service::MatchService;
use state::AppState;

pub async fn build_state(config: &Config) -> AppState {
    let match_repository: Arc<dyn MatchRepository + Send + Sync>;
    let stats_repository: Arc<dyn PlayerStatsRepository + Send + Sync>;

    match &config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            match_repository = Arc::new(InMemoryMatchRepository::new());
            stats_repository = Arc::new(InMemoryPlayerStatsRepository::new());
        }
        StorageBackend::DynamoDb {
            matches_table,
            stats_table,
        } => {
            info!(
                "Using DynamoDB storage (matches: {}, stats: {})",
                matches_table, stats_table
            );
            let aws_config = aws_config::load_from_env().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            match_repository = Arc::new(DynamoDbMatchRepository::new(
                client.clone(),
                matches_table.clone(),
            ));
            stats_repository = Arc::new(DynamoDbPlayerStatsRepository::new(
                client,
                stats_table.clone(),
            ));
        }
    }

    AppState {
        auth_service: Arc::new(AuthService::with_jwt_secret(config.jwt_secret.clone())),
        match_service: Arc::new(MatchService::new(match_repository, stats_repository)),
    }
}

pub fn app(state: AppState) -> Router {
    // TODO: restrict origins to the web client's domain once it is fixed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::matches::routes())
        .merge(routes::stats::routes())
        .layer(cors)
        .with_state(state)
}
