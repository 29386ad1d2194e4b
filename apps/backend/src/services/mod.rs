//! Engine services consumed by the HTTP layer.

pub mod game_flow;
pub mod users;

pub use game_flow::{GameFlowService, GuessReport};
