//! Offline progress estimate toward a chosen store item.
//!
//! Reads the two persisted files and predicts how many cookies the tracked
//! time has earned. Earnings follow `88 * (quality/15)^k * (1 + beta * ln(1 + h))`
//! per project. Because the log has diminishing returns, summing per project
//! gives a larger total than applying it once to the combined hours.

use crate::error::{Error, Result};
use crate::stats::types::{ProjectStat, Seconds, StatsOutput};
use crate::storage;
use crate::store::types::{Cost, StoreOutput};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

const BASE_COOKIES: f64 = 88.0;
const MAX_QUALITY: f64 = 15.0;
const MIN_QUALITY: f64 = 1.0;

/// Tunables for the cookie estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressParams {
    pub item: String,
    pub country: String,
    pub quality: f64,
    pub k: f64,
    pub beta: f64,
}

impl ProgressParams {
    pub fn new(item: &str) -> Self {
        Self {
            item: item.to_string(),
            country: "us".to_string(),
            quality: 10.0,
            k: 1.0,
            beta: 2.0,
        }
    }

    fn clamped_quality(&self) -> f64 {
        self.quality.clamp(MIN_QUALITY, MAX_QUALITY)
    }

    fn cookies_for_hours(&self, hours: f64) -> f64 {
        BASE_COOKIES
            * (self.clamped_quality() / MAX_QUALITY).powf(self.k)
            * (1.0 + self.beta * (1.0 + hours).ln())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetProgress {
    pub name: String,
    pub country: String,
    pub price: Option<f64>,
    pub cookies_earned: f64,
    pub cookies_needed: Option<f64>,
    pub progress_pct: Option<f64>,
}

/// Predicted cookies for the tracked time.
///
/// Falls back to total hours when the stats carry no project breakdown.
pub fn estimate_cookies(stats: &StatsOutput, params: &ProgressParams) -> f64 {
    if stats.projects.is_empty() {
        let total_hours = stats.total_seconds.as_ref().map_or(0.0, Seconds::as_f64) / 3600.0;
        return params.cookies_for_hours(total_hours);
    }
    stats
        .projects
        .iter()
        .map(|ProjectStat { hours, .. }| params.cookies_for_hours(*hours))
        .sum()
}

/// Price in the requested country, falling back to the base cost.
pub fn item_price(item: &Value, country: &str) -> Option<f64> {
    let ticket_cost = item.get("ticket_cost")?;
    ticket_cost
        .get(country)
        .filter(|v| !v.is_null())
        .or_else(|| ticket_cost.get("base_cost"))
        .and_then(Cost::from_json)
        .and_then(|cost| cost.value())
}

fn find_item<'a>(store: &'a StoreOutput, name: &str) -> Option<&'a Value> {
    store
        .raw_data
        .get("items")?
        .as_array()?
        .iter()
        .find(|item| item.get("name").and_then(Value::as_str).map(str::trim) == Some(name))
}

pub fn evaluate(
    stats: &StatsOutput,
    store: &StoreOutput,
    params: &ProgressParams,
) -> Result<TargetProgress> {
    let wanted = params.item.trim();
    let item = find_item(store, wanted).ok_or_else(|| Error::UnknownItem {
        name: wanted.to_string(),
    })?;

    let country = params.country.trim().to_lowercase();
    let price = item_price(item, &country);
    let earned = estimate_cookies(stats, params);

    Ok(TargetProgress {
        name: wanted.to_string(),
        country,
        price,
        cookies_earned: earned,
        cookies_needed: price.map(|p| (p - earned).max(0.0)),
        progress_pct: price
            .filter(|p| *p > 0.0)
            .map(|p| (earned / p * 100.0).min(100.0)),
    })
}

/// Loads `stats.json` and `ft_store.json` from storage and evaluates the target.
pub fn run(root: &Path, params: &ProgressParams) -> Result<TargetProgress> {
    let stats: StatsOutput = storage::read_json(root, storage::STATS_FILE)?;
    let store: StoreOutput = storage::read_json(root, storage::STORE_FILE)?;
    let progress = evaluate(&stats, &store, params)?;
    tracing::info!(
        "{}: {:.1} cookies earned, price {:?}",
        progress.name,
        progress.cookies_earned,
        progress.price
    );
    Ok(progress)
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
