use std::env;

use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub poll_interval_secs: u64,
    pub boost_increment: f64,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            base_url: env::var("BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            poll_interval_secs: parse_or_default("POLL_INTERVAL_SECS", 5)?,
            boost_increment: parse_or_default("BOOST_INCREMENT", 10.0)?,
            request_timeout_secs: parse_or_default("REQUEST_TIMEOUT_SECS", 15)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, ClientError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| ClientError::Config(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
