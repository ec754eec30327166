use thiserror::Error;

use super::game::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("cannot {action} a game that is {state}")]
    InvalidGameTransition {
        action: &'static str,
        state: GameState,
    },
}
