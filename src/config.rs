//! Credential and endpoint configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the project root. Variables already set in the environment take
//! precedence over the file.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const HACKATIME_API_KEY: &str = "HACKATIME_API_KEY";
pub const HACKATIME_USERNAME: &str = "HACKATIME_USERNAME";
pub const HACKATIME_BASE_URL: &str = "HACKATIME_BASE_URL";
pub const FT_API_KEY: &str = "FT_API_KEY";
pub const FT_BASE_URL: &str = "FT_BASE_URL";

const DEFAULT_HACKATIME_BASE_URL: &str = "https://hackatime.hackclub.com/api/v1";
const DEFAULT_FT_BASE_URL: &str = "https://flavortown.hackclub.com/api/v1";

pub const DEFAULT_START_DATE: &str = "2025-12-15";
pub const DEFAULT_END_DATE: &str = "2026-03-31";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const ENV_FILE_NAME: &str = ".env";

/// Loads a dotenv file without overriding variables already in the environment.
///
/// With no explicit path, `<root>/.env` is tried and silently skipped when it
/// does not exist. An explicit path that cannot be loaded is an error.
pub fn load_env_file(root: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let default = root.join(ENV_FILE_NAME);
            if !default.exists() {
                tracing::debug!("No env file at {}", default.display());
                return Ok(None);
            }
            default
        }
    };

    dotenvy::from_path(&path).map_err(|source| Error::EnvFile {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("Loaded env file {}", path.display());
    Ok(Some(path))
}

/// Reads a variable, trimming whitespace and treating empty values as unset.
pub fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require(name: &'static str) -> Result<String> {
    env_value(name).ok_or(Error::MissingCredential { name })
}

fn base_url(override_var: &str, default: &str) -> String {
    env_value(override_var)
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Inclusive date window sent to the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidSetting {
                name: "date range",
                reason: format!("start {} is after end {}", start, end),
            });
        }
        Ok(Self { start, end })
    }

    /// Formats a date the way the stats endpoint expects (`YYYY-MM-DD`).
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Everything the stats pipeline needs before it touches the network.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    pub api_key: String,
    pub username: String,
    pub base_url: String,
    pub range: DateRange,
}

impl StatsConfig {
    pub fn from_env(range: DateRange) -> Result<Self> {
        Ok(Self {
            api_key: require(HACKATIME_API_KEY)?,
            username: require(HACKATIME_USERNAME)?,
            base_url: base_url(HACKATIME_BASE_URL, DEFAULT_HACKATIME_BASE_URL),
            range,
        })
    }
}

/// Everything the store pipeline needs before it touches the network.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_key: String,
    pub base_url: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: require(FT_API_KEY)?,
            base_url: base_url(FT_BASE_URL, DEFAULT_FT_BASE_URL),
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
