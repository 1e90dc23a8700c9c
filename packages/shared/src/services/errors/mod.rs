pub mod auth_service_errors;
pub mod board_errors;
pub mod match_errors;
pub mod match_service_errors;
