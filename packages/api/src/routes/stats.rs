use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::error;

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::player_stats::PlayerStatsResponse;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile/me", get(get_my_stats))
        .route("/players/{player_id}/stats", get(get_player_stats))
}

async fn load_stats(state: &AppState, player_id: &str) -> Result<Json<PlayerStatsResponse>, ApiError> {
    state
        .match_service
        .get_player_stats(player_id)
        .await
        .map(|stats| Json(PlayerStatsResponse::from(stats)))
        .map_err(|e| {
            error!("Failed to load stats for {}: {}", player_id, e);
            ApiError::from(e)
        })
}

async fn get_my_stats(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<PlayerStatsResponse>, ApiError> {
    load_stats(&state, &authenticated_user.user_id).await
}

async fn get_player_stats(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerStatsResponse>, ApiError> {
    load_stats(&state, &player_id).await
}
