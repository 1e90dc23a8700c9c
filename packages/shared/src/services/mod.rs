pub mod auth_service;
pub mod board_engine;
pub mod errors;
pub mod match_controller;
pub mod match_service;
