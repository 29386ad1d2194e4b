use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_MUTATION_RETRIES: u32 = 3;

/// Engine tuning read from `CODENAMES_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Rounds per game; `None` means one round per roster slot.
    pub rounds_per_game: Option<u32>,
    /// Fixed seed for board generation; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    /// Extra attempts after an optimistic lock conflict.
    pub mutation_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds_per_game: None,
            rng_seed: None,
            mutation_retries: DEFAULT_MUTATION_RETRIES,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let rounds_per_game = optional_var::<u32>("CODENAMES_ROUNDS_PER_GAME")?;
        if rounds_per_game == Some(0) {
            return Err(AppError::config(
                "CODENAMES_ROUNDS_PER_GAME must be at least 1",
            ));
        }
        Ok(Self {
            rounds_per_game,
            rng_seed: optional_var("CODENAMES_RNG_SEED")?,
            mutation_retries: optional_var("CODENAMES_MUTATION_RETRIES")?
                .unwrap_or(DEFAULT_MUTATION_RETRIES),
        })
    }
}

fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
        }),
        Err(_) => Ok(None),
    }
}
