pub mod config;
pub mod heuristic;
pub mod search;
