use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
use crate::repositories::errors::stats_repository_errors::StatsRepositoryError;
use crate::services::errors::match_errors::MatchError;

#[derive(Debug)]
pub enum MatchServiceError {
    Match(MatchError),
    NotFound,
    Conflict,
    ValidationError(String),
    RepositoryError(MatchRepositoryError),
    StatsError(StatsRepositoryError),
    /// The stats batch failed and the match could not be rolled back: the
    /// stored match is completed but its stats were never applied.
    Inconsistent {
        match_id: String,
        stats: StatsRepositoryError,
        restore: MatchRepositoryError,
    },
}

impl std::fmt::Display for MatchServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchServiceError::Match(err) => write!(f, "{}", err),
            MatchServiceError::NotFound => write!(f, "Game not found"),
            MatchServiceError::Conflict => {
                write!(f, "Game was modified concurrently, please retry")
            }
            MatchServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            MatchServiceError::RepositoryError(err) => write!(f, "Repository error: {}", err),
            MatchServiceError::StatsError(err) => write!(f, "Stats error: {}", err),
            MatchServiceError::Inconsistent {
                match_id,
                stats,
                restore,
            } => write!(
                f,
                "Match {} completed without stats (stats: {}; restore: {})",
                match_id, stats, restore
            ),
        }
    }
}

impl std::error::Error for MatchServiceError {}

impl From<MatchError> for MatchServiceError {
    fn from(err: MatchError) -> Self {
        MatchServiceError::Match(err)
    }
}

impl From<MatchRepositoryError> for MatchServiceError {
    fn from(err: MatchRepositoryError) -> Self {
        match err {
            MatchRepositoryError::NotFound => MatchServiceError::NotFound,
            MatchRepositoryError::VersionConflict => MatchServiceError::Conflict,
            other => MatchServiceError::RepositoryError(other),
        }
    }
}

impl From<StatsRepositoryError> for MatchServiceError {
    fn from(err: StatsRepositoryError) -> Self {
        MatchServiceError::StatsError(err)
    }
}
