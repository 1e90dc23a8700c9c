pub mod match_repository_errors;
pub mod stats_repository_errors;
