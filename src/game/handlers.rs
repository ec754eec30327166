use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::types::{GameResponse, TrackerResponse};
use crate::shared::{AppError, AppState};

async fn tracker_response(state: &AppState) -> Json<TrackerResponse> {
    Json(TrackerResponse::from(state.tracker.snapshot().await))
}

/// HTTP handler for the home view: game clock plus every player
///
/// GET /
#[instrument(name = "home", skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<TrackerResponse> {
    tracker_response(&state).await
}

/// GET /game
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(State(state): State<AppState>) -> Json<GameResponse> {
    let snapshot = state.tracker.snapshot().await;
    Json(GameResponse::from(&snapshot))
}

/// HTTP handler for starting a new game, with all players set to zero
///
/// POST /game/start
#[instrument(name = "start_game", skip(state))]
pub async fn start_game(State(state): State<AppState>) -> Json<TrackerResponse> {
    let game_state = state.tracker.start_game().await;
    info!(state = %game_state, "Start game requested");
    tracker_response(&state).await
}

/// HTTP handler for pausing the game, subbing off all players
///
/// POST /game/pause
#[instrument(name = "pause_game", skip(state))]
pub async fn pause_game(State(state): State<AppState>) -> Result<Json<TrackerResponse>, AppError> {
    let game_state = state.tracker.pause_game().await?;
    info!(state = %game_state, "Pause game requested");
    Ok(tracker_response(&state).await)
}

/// POST /game/resume
#[instrument(name = "resume_game", skip(state))]
pub async fn resume_game(State(state): State<AppState>) -> Json<TrackerResponse> {
    let game_state = state.tracker.resume_game().await;
    info!(state = %game_state, "Resume game requested");
    tracker_response(&state).await
}

/// HTTP handler for ending the game without resetting player statistics
///
/// POST /game/end
#[instrument(name = "end_game", skip(state))]
pub async fn end_game(State(state): State<AppState>) -> Result<Json<TrackerResponse>, AppError> {
    let game_state = state.tracker.end_game().await?;
    info!(state = %game_state, "End game requested");
    Ok(tracker_response(&state).await)
}

/// POST /game/reset
#[instrument(name = "reset_game", skip(state))]
pub async fn reset_game(State(state): State<AppState>) -> Json<TrackerResponse> {
    let game_state = state.tracker.reset_game().await;
    info!(state = %game_state, "Reset game requested");
    tracker_response(&state).await
}
