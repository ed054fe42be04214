//! Time-tracking stats pipeline.
//!
//! Fetches stats for a date range, folds the Text bucket into Python, adds a
//! per-project hour breakdown and persists the result to `storage/stats.json`.

pub mod duration;
pub mod languages;
pub mod projects;
pub mod types;

use crate::api_client::ApiClient;
use crate::config::{DateRange, StatsConfig};
use crate::error::{Error, Result};
use crate::storage;
use languages::normalize_languages;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use projects::aggregate_projects;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use types::{Seconds, StatsData, StatsOutput, StatsResponse};

/// Characters escaped when a username becomes a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn stats_path(username: &str) -> String {
    format!(
        "users/{}/stats",
        utf8_percent_encode(username, PATH_SEGMENT)
    )
}

/// Requests stats for the configured user and date range.
pub fn fetch_stats(client: &ApiClient, config: &StatsConfig) -> Result<StatsData> {
    let path = stats_path(&config.username);
    let query = [
        ("start", DateRange::format_date(config.range.start)),
        ("end", DateRange::format_date(config.range.end)),
    ];
    let body = client.get_json(&path, &query)?;

    let url = client.url(&path);
    let response: StatsResponse =
        serde_json::from_value(body).map_err(|e| Error::UnexpectedShape {
            url: url.clone(),
            reason: e.to_string(),
        })?;

    response.data.ok_or(Error::UnexpectedShape {
        url,
        reason: "missing data object".to_string(),
    })
}

/// Reshapes the API payload into the persisted record.
pub fn build_output(data: StatsData) -> StatsOutput {
    let grand_total = data.total_seconds.as_ref().map_or(0.0, Seconds::as_f64);
    let projects = aggregate_projects(&data.projects);
    let languages = normalize_languages(data.languages, grand_total);

    StatsOutput {
        total_seconds: data.total_seconds,
        human_readable: data.human_readable_total,
        languages,
        projects,
    }
}

/// Runs the whole stats pipeline.
///
/// The file is written before anything reaches `out`, so a failed write
/// produces no output at all.
pub fn run(
    config: &StatsConfig,
    root: &Path,
    timeout: Duration,
    out: &mut impl Write,
) -> Result<(StatsOutput, PathBuf)> {
    let client = ApiClient::new(&config.base_url, &config.api_key, timeout);
    let data = fetch_stats(&client, config)?;
    tracing::info!(
        "Fetched stats for {}: {} languages, {} projects",
        config.username,
        data.languages.len(),
        data.projects.len()
    );

    let output = build_output(data);
    let path = storage::write_json(root, storage::STATS_FILE, &output)?;

    let mut payload = storage::to_pretty_json(&output)?;
    payload.push(b'\n');
    out.write_all(&payload)
        .and_then(|_| out.flush())
        .map_err(Error::Stdout)?;

    Ok((output, path))
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
