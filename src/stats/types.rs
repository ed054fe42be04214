//! Data types for the time-tracking stats pipeline.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Top-level body returned by the stats endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub data: Option<StatsData>,
}

/// A seconds count kept in the number form the API sent.
///
/// Untouched values serialize back unchanged, so `4339` stays an integer.
/// Seconds computed here are always floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seconds(Number);

impl Seconds {
    /// Non-finite values are stored as zero.
    pub fn from_f64(value: f64) -> Self {
        Self(Number::from_f64(value).unwrap_or_else(|| Number::from(0u64)))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(0.0)
    }
}

impl Default for Seconds {
    fn default() -> Self {
        Self(Number::from(0u64))
    }
}

impl PartialEq<f64> for Seconds {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == *other
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsData {
    /// Grand total across all languages; the percent denominator
    #[serde(default)]
    pub total_seconds: Option<Seconds>,
    #[serde(default)]
    pub human_readable_total: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<LanguageStat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects: Vec<RawProject>,
}

/// One language bucket as reported by the API.
///
/// Fields this crate does not touch are kept in `extra` and written back out
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_seconds: Seconds,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LanguageStat {
    pub fn new(name: &str, total_seconds: f64) -> Self {
        Self {
            name: name.to_string(),
            total_seconds: Seconds::from_f64(total_seconds),
            text: None,
            hours: None,
            minutes: None,
            digital: None,
            percent: None,
            extra: Map::new(),
        }
    }
}

/// Project entry as reported by the API; only name and seconds are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub total_seconds: Option<f64>,
}

/// Per-project hour breakdown written to `stats.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectStat {
    pub name: String,
    pub hours: f64,
    pub seconds: f64,
}

/// The record persisted to `stats.json` and printed to stdout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsOutput {
    pub total_seconds: Option<Seconds>,
    pub human_readable: Option<String>,
    pub languages: Vec<LanguageStat>,
    #[serde(default)]
    pub projects: Vec<ProjectStat>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
