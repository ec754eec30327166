// Public API
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use core::{PlayerUpdate, Snapshot, Tracker, TrackerOptions};
pub use errors::TrackerError;
pub use game::{Game, GameState, Period};
pub use player::{Player, PlayerConfig, PlayerView};

// Internal modules
mod clock;
mod core;
mod errors;
mod game;
mod player;
