//! Plain-text parameter store.
//!
//! Persisted parameter sets are text files of one `key: value` pair per line.
//! Blank lines and lines starting with `#` are skipped. This reader only
//! loads existing files; creating a missing set is an editor concern, not a
//! library one, so absence is a typed error rather than a prompt.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

/// Errors while reading a persisted parameter set.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Parameter set not found: {path}")]
    NotFound { path: String },

    #[error("Malformed line {line} in parameter file: '{content}'")]
    Malformed { line: usize, content: String },

    #[error("Failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse `key: value` pairs from file content.
pub fn parse_pairs(content: &str) -> Result<BTreeMap<String, String>, StoreError> {
    let mut pairs = BTreeMap::new();
    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once(':').ok_or(StoreError::Malformed {
            line: index + 1,
            content: raw.to_string(),
        })?;
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() || value.is_empty() {
            return Err(StoreError::Malformed {
                line: index + 1,
                content: raw.to_string(),
            });
        }
        pairs.insert(key.to_string(), value.to_string());
    }
    Ok(pairs)
}

/// Read and parse a parameter file from disk.
pub fn read_pairs(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    if !path.exists() {
        return Err(StoreError::NotFound {
            path: path.display().to_string(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_pairs(&content)
}
