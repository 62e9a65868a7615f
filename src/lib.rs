//! rescache - a local cache for HTTP-fetched resources.
//!
//! A [`cache::ResourceCache`] is built from a URL template with one `{}`
//! slot. Each parameter substituted into the template maps to one file in
//! the cache directory; the first [`get`](cache::ResourceCache::get) fetches
//! it, every later one reads it from disk until it is removed.
//!
//! # Modules
//!
//! - [`cache`] - Template keyed resource cache
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings file and environment overrides
//! - [`data`] - JSON and YAML data files
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - HTTP transport
//! - [`files`] - File copy and path helpers
//! - [`glob`] - Glob matching for directory listings
//!
//! # Example
//!
//! ```
//! use rescache::cache::ResourceCache;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let cache = ResourceCache::new("https://example.com/groups/{}.json", temp.path()).unwrap();
//!
//! let entry = cache.resolve("osi");
//! assert_eq!(entry.target, "https://example.com/groups/osi.json");
//! assert_eq!(entry, cache.resolve("osi"));
//! assert!(!cache.is_cached("osi"));
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod fetch;
pub mod files;
pub mod glob;

pub use error::{CacheError, Result};
