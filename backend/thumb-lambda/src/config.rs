/// Configuration for the thumbnail binaries
///
/// Loads configuration from environment variables with sensible defaults.
/// Thumbnail bounds, codec and naming are fixed and not configurable.
use s3_utils::S3Config;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub s3: S3Config,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            s3: S3Config::from_lookup(&lookup),
            log_format,
        })
    }
}

/// Settings for the `thumb-backfill` binary
#[derive(Clone, Debug)]
pub struct BackfillConfig {
    pub bucket: String,
    /// Only keys under this prefix are considered
    pub prefix: String,
    /// Pause between processed objects to avoid S3 throttling bursts
    pub delay: Duration,
}

impl BackfillConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = lookup("BACKFILL_BUCKET")
            .filter(|b| !b.trim().is_empty())
            .ok_or(ConfigError::Missing("BACKFILL_BUCKET"))?;

        let delay_ms = match lookup("BACKFILL_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "BACKFILL_DELAY_MS",
                value: raw.clone(),
            })?,
            None => 50,
        };

        Ok(Self {
            bucket,
            prefix: lookup("BACKFILL_PREFIX").unwrap_or_default(),
            delay: Duration::from_millis(delay_ms),
        })
    }
}
