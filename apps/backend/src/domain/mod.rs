//! Domain layer: pure game rules, no storage or transport.

pub mod board;
pub mod board_gen;
pub mod game;
pub mod model;
pub mod roster;
pub mod round;
pub mod turn;
pub mod view;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props;

// Re-exports for ergonomics
pub use board::{Board, Coord, MapBoard, MapCell, PointedBoard, ProgressBoard, WordsBoard};
pub use game::{settle_round, start_game, RoundAdvance};
pub use model::{
    Clue, Game, GameId, GameStatus, Round, RoundId, RoundStatus, Team, TeamId, Turn, TurnId,
    TurnStatus, User, UserId, Word, WordId,
};
pub use turn::{GuessOutcome, GuessResult};
pub use view::{game_view, GameView};
