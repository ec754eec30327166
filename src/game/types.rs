use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::format_duration;
use crate::players::PlayerResponse;
use crate::tracker::{GameState, Period, Snapshot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResponse {
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<&Period> for PeriodResponse {
    fn from(period: &Period) -> Self {
        Self {
            started_at: period.start.wall,
            ended_at: period.end.map(|end| end.wall),
        }
    }
}

/// The game clock as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub state: GameState,
    pub poll: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub periods: usize,
    pub current_period: Option<PeriodResponse>,
    pub elapsed_ms: u64,
    pub elapsed: String,
}

impl From<&Snapshot> for GameResponse {
    fn from(snapshot: &Snapshot) -> Self {
        let game = &snapshot.game;
        let state = game.state();
        let elapsed = snapshot.game_elapsed();

        Self {
            state,
            poll: state.is_live(),
            started_at: game.overall_start().map(|start| start.wall),
            ended_at: game.overall_end().map(|end| end.wall),
            periods: game.periods().len(),
            current_period: game.current_period().map(PeriodResponse::from),
            elapsed_ms: elapsed.as_millis() as u64,
            elapsed: format_duration(elapsed),
        }
    }
}

/// Game and players together, returned after every game action
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackerResponse {
    pub game: GameResponse,
    pub players: Vec<PlayerResponse>,
    pub poll: bool,
}

impl From<Snapshot> for TrackerResponse {
    fn from(snapshot: Snapshot) -> Self {
        let game = GameResponse::from(&snapshot);

        Self {
            poll: game.poll,
            game,
            players: snapshot
                .players
                .into_iter()
                .map(PlayerResponse::from)
                .collect(),
        }
    }
}
