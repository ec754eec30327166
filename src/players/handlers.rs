use axum::{
    extract::{Path, State},
    Json,
};
use std::time::Duration;
use tracing::{info, instrument};

use super::types::{
    PlayerNamesRequest, PlayerResponse, PlayerSetEntry, PlayerSetRequest, PlayersResponse,
    SubResponse,
};
use crate::duration::parse_duration;
use crate::shared::{AppError, AppState};
use crate::tracker::PlayerUpdate;

async fn players_response(state: &AppState, ignored: Vec<String>) -> PlayersResponse {
    let snapshot = state.tracker.snapshot().await;

    PlayersResponse {
        poll: snapshot.state().is_live(),
        players: snapshot.players.into_iter().map(PlayerResponse::from).collect(),
        ignored,
    }
}

fn parse_entry(entry: &PlayerSetEntry) -> Result<(String, u32, Duration), AppError> {
    let play_count = entry.play_count.trim().parse::<u32>().map_err(|err| {
        AppError::BadRequest(format!(
            "parsing play count, name: {} error: {}",
            entry.name, err
        ))
    })?;

    let play_duration = parse_duration(&entry.play_duration).map_err(|err| {
        AppError::BadRequest(format!(
            "parsing duration, name: {} error: {}",
            entry.name, err
        ))
    })?;

    Ok((entry.name.clone(), play_count, play_duration))
}

/// HTTP handler for listing player statistics
///
/// GET /players
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(State(state): State<AppState>) -> Json<PlayersResponse> {
    Json(players_response(&state, Vec::new()).await)
}

/// HTTP handler for zeroing play count and duration of the named players
///
/// POST /players/reset
#[instrument(name = "reset_players", skip(state))]
pub async fn reset_players(
    State(state): State<AppState>,
    Json(request): Json<PlayerNamesRequest>,
) -> Result<Json<PlayersResponse>, AppError> {
    if request.players.is_empty() {
        return Err(AppError::BadRequest("player names not provided".to_string()));
    }

    let mut ignored = Vec::new();
    for name in request.players {
        if let PlayerUpdate::UnknownPlayer = state.tracker.player_reset(&name).await {
            ignored.push(name);
        }
    }

    info!(ignored = ignored.len(), "Players reset");
    Ok(Json(players_response(&state, ignored).await))
}

/// HTTP handler for overwriting play count and duration
///
/// POST /players/set
/// Every entry is validated first; a single malformed value rejects the
/// whole request and nothing is changed.
#[instrument(name = "set_players", skip(state))]
pub async fn set_players(
    State(state): State<AppState>,
    Json(request): Json<PlayerSetRequest>,
) -> Result<Json<PlayersResponse>, AppError> {
    if request.players.is_empty() {
        return Err(AppError::BadRequest("all player values not provided".to_string()));
    }

    let updates = request
        .players
        .iter()
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;

    let ignored: Vec<String> = state
        .tracker
        .player_set_many(&updates)
        .await
        .into_iter()
        .filter(|(_, update)| !update.is_applied())
        .map(|(name, _)| name)
        .collect();

    info!(
        updated = updates.len() - ignored.len(),
        ignored = ignored.len(),
        "Player statistics set"
    );
    Ok(Json(players_response(&state, ignored).await))
}

fn sub_response(name: String, update: PlayerUpdate) -> SubResponse {
    match update {
        PlayerUpdate::Applied(view) => SubResponse {
            name,
            playing: view.playing,
            applied: true,
        },
        PlayerUpdate::UnknownPlayer => SubResponse {
            name,
            playing: false,
            applied: false,
        },
    }
}

/// HTTP handler for subbing a player on
///
/// POST /players/:name/sub-on
#[instrument(name = "sub_on_player", skip(state))]
pub async fn sub_on_player(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<SubResponse> {
    let update = state.tracker.player_sub_on(&name).await;
    Json(sub_response(name, update))
}

/// HTTP handler for subbing a player off
///
/// POST /players/:name/sub-off
#[instrument(name = "sub_off_player", skip(state))]
pub async fn sub_off_player(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<SubResponse> {
    let update = state.tracker.player_sub_off(&name).await;
    Json(sub_response(name, update))
}
