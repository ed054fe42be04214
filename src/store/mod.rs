//! Storefront pipeline: fetch items, drop accessories, order by cost, persist.

pub mod catalog;
pub mod types;

use crate::api_client::ApiClient;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::storage;
use std::path::{Path, PathBuf};
use std::time::Duration;
use types::StoreOutput;

const STORE_PATH: &str = "store";

/// Fetches the storefront and writes `storage/ft_store.json`.
pub fn run(config: &StoreConfig, root: &Path, timeout: Duration) -> Result<(StoreOutput, PathBuf)> {
    let client = ApiClient::new(&config.base_url, &config.api_key, timeout);
    let payload = client.get_json(STORE_PATH, &[])?;

    let output = catalog::build_output(&client.url(STORE_PATH), payload)?;
    tracing::info!("Fetched store: {} items after filtering", output.item_names.len());

    let path = storage::write_json(root, storage::STORE_FILE, &output)?;
    Ok((output, path))
}
