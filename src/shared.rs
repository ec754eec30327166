use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::tracker::{Tracker, TrackerError};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
}

impl AppState {
    pub fn new(tracker: Arc<Tracker>) -> Self {
        Self { tracker }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidGameTransition { .. } => AppError::Conflict(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        tracing::error!(status = %status, error = %error_message, "Responding with error");

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use crate::tracker::{ManualClock, PlayerConfig, TrackerOptions};

    /// Builder for creating AppState with overrides for testing
    pub struct AppStateBuilder {
        players: Vec<PlayerConfig>,
        options: TrackerOptions,
        clock: Option<Arc<ManualClock>>,
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                players: Vec::new(),
                options: TrackerOptions::default(),
                clock: None,
            }
        }

        pub fn with_players(mut self, players: &[(&str, i64)]) -> Self {
            self.players = players
                .iter()
                .map(|(name, number)| PlayerConfig::new(*name, *number))
                .collect();
            self
        }

        pub fn with_clock(mut self, clock: Arc<ManualClock>) -> Self {
            self.clock = Some(clock);
            self
        }

        pub fn build(self) -> AppState {
            let clock = self.clock.unwrap_or_else(|| Arc::new(ManualClock::new()));
            AppState::new(Arc::new(Tracker::with_clock(
                self.players,
                self.options,
                clock,
            )))
        }
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }
}
