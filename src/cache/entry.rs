//! Cache entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where an entry lives and what it is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Path of the entry file inside the cache directory.
    pub path: PathBuf,
    /// Request target with the parameter substituted.
    pub target: String,
}

/// An entry file found on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Path to the cached content.
    pub path: PathBuf,
    /// Parameter digest from the file name.
    pub param_key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last time the content was written.
    pub modified: DateTime<Utc>,
}

impl StoredEntry {
    /// Get the age of this entry.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.modified)
    }
}
