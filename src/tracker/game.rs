use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum_macros::{Display, EnumIter};

use super::clock::Timestamp;

/// One contiguous interval during which the game clock ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

impl Period {
    pub fn open(start: Timestamp) -> Self {
        Self { start, end: None }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Length of the period, measuring an open period up to `now`.
    pub fn length(&self, now: Timestamp) -> Duration {
        self.start.until(self.end.unwrap_or(now))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameState {
    NotStarted,
    InProgress,
    Paused,
    Finished,
}

impl GameState {
    /// Whether a client watching the game should keep refreshing.
    pub fn is_live(&self) -> bool {
        matches!(self, GameState::InProgress | GameState::Paused)
    }
}

/// The match clock: an ordered list of periods plus the overall bounds.
///
/// Only the last period may be open. The state is always derived from the
/// fields, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub(super) overall_start: Option<Timestamp>,
    pub(super) overall_end: Option<Timestamp>,
    pub(super) periods: Vec<Period>,
}

impl Game {
    pub fn state(&self) -> GameState {
        match self.periods.last() {
            None => GameState::NotStarted,
            Some(last) if last.is_open() => GameState::InProgress,
            Some(_) if self.overall_start.is_some() && self.overall_end.is_some() => {
                GameState::Finished
            }
            Some(_) => GameState::Paused,
        }
    }

    pub fn overall_start(&self) -> Option<Timestamp> {
        self.overall_start
    }

    pub fn overall_end(&self) -> Option<Timestamp> {
        self.overall_end
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn current_period(&self) -> Option<&Period> {
        self.periods.last()
    }

    /// Total running time of the game clock at `now`.
    pub fn elapsed(&self, now: Timestamp) -> Duration {
        self.periods.iter().map(|p| p.length(now)).sum()
    }

    pub(super) fn open_period(&mut self, now: Timestamp) {
        self.periods.push(Period::open(now));
    }

    /// Stamps the end of the last period if it is still open. An already
    /// closed period keeps its end. Returns false when there is no period.
    pub(super) fn close_period(&mut self, now: Timestamp) -> bool {
        match self.periods.last_mut() {
            Some(period) => {
                if period.is_open() {
                    period.end = Some(now);
                }
                true
            }
            None => false,
        }
    }

    pub(super) fn clear(&mut self) {
        self.overall_start = None;
        self.overall_end = None;
        self.periods.clear();
    }
}
