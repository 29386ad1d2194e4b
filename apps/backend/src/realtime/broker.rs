//! Redis-backed notifier: each topic maps to a Redis pub/sub channel.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::Serialize;
use serde_json::Value;
use tokio::time::sleep;
use tracing::warn;

use super::Notifier;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};

const PUBLISHER_MAX_ATTEMPTS: u32 = 3;
const PUBLISHER_INITIAL_RETRY_DELAY_MS: u64 = 50;
const PUBLISHER_MAX_RETRY_DELAY_MS: u64 = 200;

/// Wire envelope: `{"action": <topic>, "data": <payload>}`.
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub action: &'a str,
    pub data: &'a Value,
}

pub struct RedisNotifier {
    publisher: ConnectionManager,
}

impl RedisNotifier {
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = Client::open(redis_url)
            .map_err(|err| AppError::config(format!("Invalid REDIS_URL: {err}")))?;
        let publisher = ConnectionManager::new(client)
            .await
            .map_err(|err| AppError::config(format!("Unable to connect to Redis: {err}")))?;
        Ok(Self { publisher })
    }
}

fn is_transient(err: &redis::RedisError) -> bool {
    err.is_timeout() || err.is_connection_dropped() || err.is_io_error()
}

#[async_trait]
impl Notifier for RedisNotifier {
    async fn publish(&self, topic: &str, payload: Value) -> Result<(), DomainError> {
        let encoded = serde_json::to_string(&Envelope {
            action: topic,
            data: &payload,
        })
        .map_err(|err| {
            DomainError::infra(InfraErrorKind::Notifier, format!("Failed to encode event: {err}"))
        })?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let mut publisher = self.publisher.clone();
            match publisher
                .publish::<_, _, ()>(topic, encoded.as_str())
                .await
            {
                Ok(()) => return Ok(()),
                Err(err) if attempt < PUBLISHER_MAX_ATTEMPTS && is_transient(&err) => {
                    let delay_ms = PUBLISHER_INITIAL_RETRY_DELAY_MS
                        .saturating_mul(2_u64.pow(attempt - 1))
                        .min(PUBLISHER_MAX_RETRY_DELAY_MS);
                    warn!(error = %err, attempt, retry_delay_ms = delay_ms, "Redis publish failed, retrying");
                    sleep(Duration::from_millis(delay_ms)).await;
                }
                Err(err) => {
                    return Err(DomainError::infra(
                        InfraErrorKind::Notifier,
                        format!("Failed to publish to Redis: {err}"),
                    ))
                }
            }
        }
    }
}
