//! Accessory filtering, cost ordering and the derived views over the catalog.

use super::types::{EnabledItem, StoreItem, StoreOutput, TicketCostView};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

const ACCESSORY: &str = "accessory";

/// An item paired with the exact JSON it arrived as.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub item: StoreItem,
    pub raw: Value,
}

/// Renders an item's `type` for matching. A missing type is empty, `null`
/// reads as "None", booleans as "True"/"False" and numbers as their digits.
fn type_label(raw: &Value) -> String {
    match raw.get("type") {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => "None".to_string(),
        Some(Value::Bool(true)) => "True".to_string(),
        Some(Value::Bool(false)) => "False".to_string(),
        Some(other) => other.to_string(),
    }
}

/// True if the item's type mentions "accessory" in any case.
///
/// Runs on the raw JSON so accessories are dropped before anything else
/// about them is validated.
pub fn is_accessory(raw: &Value) -> bool {
    type_label(raw).to_lowercase().contains(ACCESSORY)
}

/// Splits the store response into its item list and the remaining top-level fields.
///
/// The endpoint has answered both with `{"items": [...]}` and with a bare
/// array; a bare array yields no extra fields.
fn split_payload(url: &str, payload: Value) -> Result<(Map<String, Value>, Vec<Value>)> {
    match payload {
        Value::Array(items) => Ok((Map::new(), items)),
        Value::Object(mut rest) => match rest.remove("items") {
            Some(Value::Array(items)) => Ok((rest, items)),
            _ => Err(Error::UnexpectedShape {
                url: url.to_string(),
                reason: "missing items array".to_string(),
            }),
        },
        _ => Err(Error::UnexpectedShape {
            url: url.to_string(),
            reason: "expected an object or an array".to_string(),
        }),
    }
}

/// Drops accessories, then parses the items that remain.
///
/// Errors name the item by its position in the response.
fn parse_entries(url: &str, items: Vec<Value>) -> Result<Vec<CatalogEntry>> {
    items
        .into_iter()
        .enumerate()
        .filter(|(_, raw)| !is_accessory(raw))
        .map(|(i, raw)| {
            let item = serde_json::from_value(raw.clone()).map_err(|e| Error::UnexpectedShape {
                url: url.to_string(),
                reason: format!("item {}: {}", i, e),
            })?;
            Ok(CatalogEntry { item, raw })
        })
        .collect()
}

/// Sorts items by ascending base cost.
///
/// The sort is stable: equal costs keep their relative order.
pub fn sort_by_cost(url: &str, entries: Vec<CatalogEntry>) -> Result<Vec<CatalogEntry>> {
    let mut priced = Vec::with_capacity(entries.len());
    for entry in entries {
        let cost = entry
            .item
            .ticket_cost
            .base_cost
            .value()
            .ok_or_else(|| Error::UnexpectedShape {
                url: url.to_string(),
                reason: format!("item {} has a non-numeric base_cost", entry.item.name),
            })?;
        priced.push((cost, entry));
    }

    priced.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(priced.into_iter().map(|(_, entry)| entry).collect())
}

/// Builds the persisted record from the raw store response.
pub fn build_output(url: &str, payload: Value) -> Result<StoreOutput> {
    let (mut raw_data, items) = split_payload(url, payload)?;
    let total = items.len();
    let entries = sort_by_cost(url, parse_entries(url, items)?)?;
    tracing::debug!("Kept {} of {} store items", entries.len(), total);

    let item_names = entries.iter().map(|e| e.item.name.clone()).collect();
    let enabled_items = entries
        .iter()
        .map(|e| EnabledItem {
            name: e.item.name.clone(),
            enabled: e.item.enabled,
        })
        .collect();
    let ticket_costs = entries
        .iter()
        .map(|e| TicketCostView {
            name: e.item.name.clone(),
            cost: e.raw.get("ticket_cost").cloned().unwrap_or(Value::Null),
        })
        .collect();

    raw_data.insert(
        "items".to_string(),
        Value::Array(entries.into_iter().map(|e| e.raw).collect()),
    );

    Ok(StoreOutput {
        item_names,
        enabled_items,
        ticket_costs,
        raw_data: Value::Object(raw_data),
    })
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
