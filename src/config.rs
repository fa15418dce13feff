use chrono::{Duration, Utc};
use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Work factors the `bcrypt` crate accepts.
const BCRYPT_COSTS: RangeInclusive<u32> = 4..=31;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub struct Config {
    /// `None` runs the server on the in-memory store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    /// Lifetime of issued tokens. Always positive and small enough to add to "now".
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: parse_checked("DATABASE_MAX_CONNECTIONS", 5, |n| *n >= 1)?,
            server_port: parse_or("SERVER_PORT", 4000)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret,
            token_ttl: token_ttl()?,
            bcrypt_cost: parse_checked("BCRYPT_COST", bcrypt::DEFAULT_COST, |cost| {
                BCRYPT_COSTS.contains(cost)
            })?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

/// `TOKEN_TTL_HOURS` as a duration. Must be at least one hour, and an expiry that
/// far from now must still be representable.
fn token_ttl() -> Result<Duration, ConfigError> {
    let hours: i64 = parse_checked("TOKEN_TTL_HOURS", 24, |hours| *hours >= 1)?;
    Duration::try_hours(hours)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| ConfigError::Invalid {
            name: "TOKEN_TTL_HOURS",
            value: hours.to_string(),
        })
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Like `parse_or`, but a value that parses and fails `accept` is also invalid.
fn parse_checked<T, F>(name: &'static str, default: T, accept: F) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&T) -> bool,
{
    let parsed = parse_or(name, default)?;
    if accept(&parsed) {
        Ok(parsed)
    } else {
        Err(ConfigError::Invalid {
            name,
            value: env::var(name).unwrap_or_default(),
        })
    }
}
