use std::{net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

use crate::infrastructure::argon2_password_hasher::Argon2Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Process-wide settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Unset means accounts live in memory
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub argon2: Argon2Config,
    pub rejection_floor: Duration,
    pub min_secret_length: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Argon2Config::default();

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            bind_addr: parse_or(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            jwt_secret: lookup("JWT_SECRET")
                .filter(|secret| !secret.is_empty())
                .ok_or(ConfigError::Missing("JWT_SECRET"))?,
            jwt_expiration_hours: parse_or(&lookup, "JWT_EXPIRATION_HOURS", 24)?,
            argon2: Argon2Config {
                memory_kib: parse_or(&lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
                time_cost: parse_or(&lookup, "ARGON2_TIME_COST", defaults.time_cost)?,
                parallelism: parse_or(&lookup, "ARGON2_PARALLELISM", defaults.parallelism)?,
            },
            rejection_floor: Duration::from_millis(parse_or(
                &lookup,
                "AUTH_REJECTION_FLOOR_MS",
                100,
            )?),
            min_secret_length: parse_or(&lookup, "PASSWORD_MIN_LENGTH", 8)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
