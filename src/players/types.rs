use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::format_duration;
use crate::tracker::PlayerView;

/// Request payload naming the players an action applies to
#[derive(Debug, Deserialize)]
pub struct PlayerNamesRequest {
    pub players: Vec<String>,
}

/// One entry of a bulk statistics update. Values arrive as text and are
/// validated before anything is applied.
#[derive(Debug, Deserialize)]
pub struct PlayerSetEntry {
    pub name: String,
    pub play_count: String,
    pub play_duration: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayerSetRequest {
    pub players: Vec<PlayerSetEntry>,
}

/// A player's statistics as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub name: String,
    pub number: i64,
    pub play_count: u32,
    pub play_duration_ms: u64,
    pub play_duration: String,
    pub playing: bool,
    pub play_started: Option<DateTime<Utc>>,
}

impl From<PlayerView> for PlayerResponse {
    fn from(view: PlayerView) -> Self {
        Self {
            play_duration_ms: view.play_duration.as_millis() as u64,
            play_duration: format_duration(view.play_duration),
            name: view.name,
            number: view.number,
            play_count: view.play_count,
            playing: view.playing,
            play_started: view.play_started,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: Vec<PlayerResponse>,
    pub poll: bool,
    /// Requested names that are not on the roster
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,
}

/// Outcome of subbing a single player on or off
#[derive(Debug, Serialize, Deserialize)]
pub struct SubResponse {
    pub name: String,
    pub playing: bool,
    pub applied: bool,
}
