//! HTTP resource caching.
//!
//! This module provides a disk-based cache for resources addressed by a
//! URL template. Each template gets its own key namespace, so several
//! templates may share one cache directory. Entries never expire; they stay
//! until removed.

pub mod entry;
pub mod key;
pub mod store;

pub use entry::{ResolvedEntry, StoredEntry};
pub use key::{param_key, CacheKey};
pub use store::{resolve_entry, ResourceCache, PLACEHOLDER};

/// Get the default cache directory.
pub fn default_cache_dir() -> std::path::PathBuf {
    std::env::temp_dir().join("rescache")
}
