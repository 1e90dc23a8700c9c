pub mod errors;
pub mod match_repository;
pub mod memory_repository;
pub mod stats_repository;
