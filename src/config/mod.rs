//! Runtime configuration for rescache.
//!
//! Settings are read from an optional YAML or JSON file and then
//! overridden by environment variables:
//! - `RESCACHE_CACHE_DIR` - cache root directory
//! - `RESCACHE_TIMEOUT` - HTTP timeout in seconds
//!
//! # Example
//!
//! ```
//! use rescache::config::Settings;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("rescache.yml");
//! fs::write(&path, "timeout_secs: 10\n").unwrap();
//!
//! let settings = Settings::from_file(&path).unwrap();
//! assert_eq!(settings.timeout_secs, 10);
//! ```

pub mod settings;

pub use settings::{Settings, ENV_CACHE_DIR, ENV_TIMEOUT};
