pub mod auth;
pub mod board;
pub mod game_match;
pub mod player_stats;
