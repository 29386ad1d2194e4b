//! Lifecycle notifications.
//!
//! The engine only needs `publish(topic, payload)`. Delivery is best-effort:
//! services log publish failures and never roll back on them.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{GameId, GuessOutcome, RoundId, TeamId, TurnId, UserId};
use crate::errors::domain::DomainError;

pub mod broker;
pub mod registry;

pub use broker::RedisNotifier;
pub use registry::TopicRegistry;

/// Topic carrying game lifecycle changes for the lobby.
pub const SEARCHING_TOPIC: &str = "searching";

pub fn game_topic(game: GameId) -> String {
    format!("game:{game}")
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, topic: &str, payload: Value) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    Created,
    Started,
    Finished,
}

/// Payload published on [`SEARCHING_TOPIC`].
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleEvent {
    pub game: GameId,
    pub status: LifecycleStatus,
}

/// Payload published on a game's own topic.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    TurnStarted {
        game: GameId,
        round: RoundId,
        turn: TurnId,
        spymaster: UserId,
    },
    EvidenceGiven {
        game: GameId,
        turn: TurnId,
        word: String,
        number: u8,
    },
    GuessMade {
        game: GameId,
        turn: TurnId,
        guess: GuessOutcome,
    },
    TurnFinished {
        game: GameId,
        turn: TurnId,
    },
    RoundFinished {
        game: GameId,
        round: RoundId,
        winner: TeamId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_payload_shape() {
        let game = GameId::new();
        let payload = serde_json::to_value(LifecycleEvent {
            game,
            status: LifecycleStatus::Started,
        })
        .unwrap();
        assert_eq!(payload["status"], "started");
        assert_eq!(payload["game"], game.to_string());
    }

    #[test]
    fn game_events_are_tagged() {
        let payload = serde_json::to_value(GameEvent::TurnFinished {
            game: GameId::new(),
            turn: TurnId::new(),
        })
        .unwrap();
        assert_eq!(payload["event"], "turn_finished");
    }
}
