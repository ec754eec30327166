use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::clock::Timestamp;

/// A roster entry as it appears in the configuration document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    // Name of the player, expected to be unique.
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Number")]
    pub number: i64,
}

impl PlayerConfig {
    pub fn new(name: impl Into<String>, number: i64) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}

/// Stored statistics for one player.
///
/// `play_duration` only ever holds completed on-field intervals; the time
/// since `play_started` is added on read and committed on sub-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub(super) name: String,
    pub(super) number: i64,
    pub(super) play_count: u32,
    pub(super) play_duration: Duration,
    pub(super) play_started: Option<Timestamp>,
}

impl From<PlayerConfig> for Player {
    fn from(config: PlayerConfig) -> Self {
        Self {
            name: config.name,
            number: config.number,
            play_count: 0,
            play_duration: Duration::ZERO,
            play_started: None,
        }
    }
}

impl Player {
    pub fn is_playing(&self) -> bool {
        self.play_started.is_some()
    }

    pub(super) fn reset(&mut self) {
        self.play_count = 0;
        self.play_duration = Duration::ZERO;
        self.play_started = None;
    }

    pub(super) fn set(&mut self, play_count: u32, play_duration: Duration) {
        self.play_count = play_count;
        self.play_duration = play_duration;
    }

    /// Marks the player as on the field. When `commit_running` is false a
    /// player who is already on has their running interval discarded.
    /// The count saturates at `u32::MAX`.
    pub(super) fn sub_on(&mut self, now: Timestamp, commit_running: bool) {
        if commit_running {
            self.commit(now);
        }
        self.play_count = self.play_count.saturating_add(1);
        self.play_started = Some(now);
    }

    pub(super) fn sub_off(&mut self, now: Timestamp) {
        self.commit(now);
        self.play_started = None;
    }

    fn commit(&mut self, now: Timestamp) {
        if let Some(started) = self.play_started {
            self.play_duration += started.until(now);
        }
    }

    /// Projects the player's statistics at `now` without touching them.
    pub fn view(&self, now: Timestamp) -> PlayerView {
        let running = self
            .play_started
            .map(|started| started.until(now))
            .unwrap_or_default();

        PlayerView {
            name: self.name.clone(),
            number: self.number,
            play_count: self.play_count,
            play_duration: self.play_duration + running,
            playing: self.is_playing(),
            play_started: self.play_started.map(|started| started.wall),
        }
    }
}

/// Read-side snapshot of a player, with live play time folded in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub name: String,
    pub number: i64,
    pub play_count: u32,
    pub play_duration: Duration,
    pub playing: bool,
    pub play_started: Option<DateTime<Utc>>,
}
