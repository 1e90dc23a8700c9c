use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error};

use crate::{error::ApiError, middleware::auth::AuthenticatedUser, state::AppState};
use shared::models::game_match::requests::{
    CompleteMatchRequest, CreateMatchRequest, MakeMoveRequest,
};
use shared::models::game_match::responses::MatchHistoryEntry;
use shared::models::game_match::{Match, Move};
use shared::services::errors::match_service_errors::MatchServiceError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/games", post(create_match))
        .route("/games/{match_id}", get(get_match))
        .route("/games/{match_id}/moves", get(get_moves))
        .route("/games/{match_id}/make_move", post(make_move))
        .route("/games/{match_id}/complete", post(complete_match))
        .route("/match-history", get(match_history))
}

fn log_failure(action: &str, match_id: &str, err: MatchServiceError) -> ApiError {
    match err {
        MatchServiceError::RepositoryError(_)
        | MatchServiceError::StatsError(_)
        | MatchServiceError::Inconsistent { .. } => {
            error!("Failed to {} for game {}: {}", action, match_id, err)
        }
        _ => debug!("Rejected {} for game {}: {}", action, match_id, err),
    }
    ApiError::from(err)
}

async fn create_match(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(payload): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let game = state
        .match_service
        .create_match(&authenticated_user.user_id, &payload.player2_id)
        .await
        .map_err(|e| {
            debug!(
                "Failed to create game {} vs {}: {}",
                authenticated_user.user_id, payload.player2_id, e
            );
            ApiError::from(e)
        })?;
    Ok((StatusCode::CREATED, Json(game)))
}

async fn get_match(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(match_id): Path<String>,
) -> Result<Json<Match>, ApiError> {
    state
        .match_service
        .get_match(&match_id)
        .await
        .map(Json)
        .map_err(|e| log_failure("load game", &match_id, e))
}

async fn get_moves(
    State(state): State<AppState>,
    _authenticated_user: AuthenticatedUser,
    Path(match_id): Path<String>,
) -> Result<Json<Vec<Move>>, ApiError> {
    state
        .match_service
        .get_moves(&match_id)
        .await
        .map(Json)
        .map_err(|e| log_failure("load moves", &match_id, e))
}

async fn make_move(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(match_id): Path<String>,
    Json(payload): Json<MakeMoveRequest>,
) -> Result<Json<Match>, ApiError> {
    let game = state
        .match_service
        .submit_move(
            &match_id,
            &authenticated_user.user_id,
            payload.row,
            payload.col,
        )
        .await
        .map_err(|e| log_failure("make move", &match_id, e))?;
    debug!(
        "Player {} moved at ({}, {}) in game {}",
        authenticated_user.user_id, payload.row, payload.col, match_id
    );
    Ok(Json(game))
}

async fn complete_match(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(match_id): Path<String>,
    Json(payload): Json<CompleteMatchRequest>,
) -> Result<Json<Match>, ApiError> {
    state
        .match_service
        .complete_match(
            &match_id,
            &authenticated_user.user_id,
            payload.winner_id.as_deref(),
        )
        .await
        .map(Json)
        .map_err(|e| log_failure("complete game", &match_id, e))
}

async fn match_history(
    State(state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<Vec<MatchHistoryEntry>>, ApiError> {
    state
        .match_service
        .match_history(&authenticated_user.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(
                "Failed to load match history for {}: {}",
                authenticated_user.user_id, e
            );
            ApiError::from(e)
        })
}
