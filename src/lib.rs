// Library crate for the substitution tracker server
// This file exposes the public API for integration tests

pub mod config;
pub mod duration;
pub mod game;
pub mod players;
pub mod shared;
pub mod tracker;
pub mod web;

// Re-export commonly used types for easier access in tests
pub use config::{load_config, load_config_file, Config, ConfigError};
pub use shared::{AppError, AppState};
pub use tracker::{
    GameState, PlayerConfig, PlayerUpdate, PlayerView, Tracker, TrackerError, TrackerOptions,
};
