// Public API - what other modules can use
pub use handlers::{end_game, get_game, home, pause_game, reset_game, resume_game, start_game};
pub use types::{GameResponse, PeriodResponse, TrackerResponse};

// Internal modules
mod handlers;
pub mod types;
