//! File-backed record source (JSON or YAML).

use super::{Record, RecordSource};
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load a record list from a `.json`, `.yaml`, or `.yml` file.
pub fn load_records(path: &Path) -> Result<Vec<Record>, ApiError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ApiError::DataSource(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let records: Vec<Record> = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents)?,
        Some("json") | None => serde_json::from_str(&contents)?,
        Some(other) => {
            return Err(ApiError::DataSource(format!(
                "Unsupported data file extension: {} (expected json, yaml or yml)",
                other
            )))
        }
    };

    debug!(path = %path.display(), count = records.len(), "Loaded records");
    Ok(records)
}

/// Records read once from a data file
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
    records: Vec<Record>,
}

impl FileRecordSource {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let path = path.into();
        let records = load_records(&path)?;
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for FileRecordSource {
    fn records(&self) -> &[Record] {
        &self.records
    }
}
