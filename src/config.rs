use std::env;

use crate::error::LedgerError;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub command_queue_size: usize,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, LedgerError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            command_queue_size: parse_or_default("COMMAND_QUEUE_SIZE", 256)?,
            seed_demo: parse_or_default("SEED_DEMO_FLEET", true)?,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, LedgerError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| LedgerError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
