use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A point in time as seen by the tracker.
///
/// Elapsed-time arithmetic always goes through the monotonic `instant`; `wall`
/// is kept only so views can show when something happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub instant: Instant,
    pub wall: DateTime<Utc>,
}

impl Timestamp {
    pub fn new(instant: Instant, wall: DateTime<Utc>) -> Self {
        Self { instant, wall }
    }

    /// Time elapsed from `self` until `later`, saturating at zero.
    pub fn until(&self, later: Timestamp) -> Duration {
        later.instant.saturating_duration_since(self.instant)
    }
}

/// Source of "now" for the tracker
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Clock backed by the operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(Instant::now(), Utc::now())
    }
}

/// Clock that only moves when told to. Used to drive the tracker through
/// exact durations in tests.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(SystemClock.now()),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let wall_step = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::zero());
        *current = Timestamp::new(current.instant + by, current.wall + wall_step);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
