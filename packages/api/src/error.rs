use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::game_match::responses::ErrorResponse;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, match_errors::MatchError,
    match_service_errors::MatchServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    MatchService(MatchServiceError),
    AuthService(AuthServiceError),
}

impl From<MatchServiceError> for ApiError {
    fn from(error: MatchServiceError) -> Self {
        ApiError::MatchService(error)
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MatchService(MatchServiceError::Match(MatchError::NotParticipant)) => {
                StatusCode::FORBIDDEN
            }
            ApiError::MatchService(MatchServiceError::Match(_)) => StatusCode::BAD_REQUEST,
            ApiError::MatchService(MatchServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MatchService(MatchServiceError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::MatchService(MatchServiceError::Conflict) => StatusCode::CONFLICT,
            ApiError::MatchService(
                MatchServiceError::RepositoryError(_)
                | MatchServiceError::StatsError(_)
                | MatchServiceError::Inconsistent { .. },
            ) => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::AuthService(
                AuthServiceError::MissingCredentials
                | AuthServiceError::ValidationError(_)
                | AuthServiceError::InvalidToken
                | AuthServiceError::ExpiredToken,
            ) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            match &self {
                ApiError::MatchService(err) => err.to_string(),
                ApiError::AuthService(err) => err.to_string(),
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
