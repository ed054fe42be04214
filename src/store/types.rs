//! Data types for the storefront pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed view of one storefront item, used for filtering and sorting.
///
/// The untouched JSON for the item travels alongside it, so this only
/// names the fields the pipeline reads. `type` is checked on the raw JSON
/// before an item gets this far.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreItem {
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    pub ticket_cost: TicketCost,
}

/// Only the base cost drives ordering; per-country prices stay in the raw item.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketCost {
    pub base_cost: Cost,
}

/// A price that the API may send either as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cost {
    Number(f64),
    Text(String),
}

impl Cost {
    /// Returns the numeric value, or `None` if a string cost does not parse.
    pub fn value(&self) -> Option<f64> {
        match self {
            Cost::Number(n) => Some(*n),
            Cost::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnabledItem {
    pub name: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketCostView {
    pub name: String,
    /// The item's full `ticket_cost` object, regional prices included
    pub cost: Value,
}

/// The record persisted to `ft_store.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreOutput {
    pub item_names: Vec<String>,
    pub enabled_items: Vec<EnabledItem>,
    pub ticket_costs: Vec<TicketCostView>,
    pub raw_data: Value,
}
