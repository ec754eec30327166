// Public API - what other modules can use
pub use handlers::{list_players, reset_players, set_players, sub_off_player, sub_on_player};
pub use types::{PlayerResponse, PlayersResponse, SubResponse};

// Internal modules
mod handlers;
pub mod types;
