//! JSON persistence under `<root>/storage/`.
//!
//! - `stats.json` - Normalized time-tracking stats
//! - `ft_store.json` - Filtered and sorted storefront items

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const STORAGE_DIR: &str = "storage";
pub const STATS_FILE: &str = "stats.json";
pub const STORE_FILE: &str = "ft_store.json";

const INDENT: &[u8] = b"    ";

/// Returns the storage directory for a project root: `<root>/storage/`
pub fn storage_dir(root: &Path) -> PathBuf {
    root.join(STORAGE_DIR)
}

/// Serializes `value` as pretty JSON with a four-space indent.
///
/// Field order follows the struct definitions and map keys are sorted, so the
/// same value always produces the same bytes.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(Error::Serialize)?;
    Ok(buf)
}

/// Writes `value` to `<root>/storage/<file_name>`, creating the directory if needed.
///
/// The content is written to a temporary file in the same directory and then
/// renamed over the target, so readers never observe a half-written file.
///
/// # Errors
///
/// Returns an error if:
/// - The storage directory cannot be created
/// - The temporary file cannot be written or renamed into place
pub fn write_json<T: Serialize>(root: &Path, file_name: &str, value: &T) -> Result<PathBuf> {
    let content = to_pretty_json(value)?;

    let dir = storage_dir(root);
    fs::create_dir_all(&dir).map_err(|source| Error::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(file_name);
    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|source| Error::FileWrite {
        path: path.clone(),
        source,
    })?;
    tmp.write_all(&content)
        .and_then(|_| tmp.flush())
        .map_err(|source| Error::FileWrite {
            path: path.clone(),
            source,
        })?;
    tmp.persist(&path).map_err(|e| Error::FileWrite {
        path: path.clone(),
        source: e.error,
    })?;

    tracing::info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(path)
}

/// Reads and parses `<root>/storage/<file_name>`.
pub fn read_json<T: DeserializeOwned>(root: &Path, file_name: &str) -> Result<T> {
    let path = storage_dir(root).join(file_name);
    let content = fs::read_to_string(&path).map_err(|source| Error::FileRead {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::JsonParse { path, source })
}
