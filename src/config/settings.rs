//! Runtime settings for the cache and its HTTP client.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::default_cache_dir;
use crate::data::read_data_file_as;
use crate::error::{CacheError, Result};
use crate::fetch::HttpFetcher;

/// Environment variable overriding the cache directory.
pub const ENV_CACHE_DIR: &str = "RESCACHE_CACHE_DIR";

/// Environment variable overriding the HTTP timeout, in seconds.
pub const ENV_TIMEOUT: &str = "RESCACHE_TIMEOUT";

/// Settings file contents, after environment overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cache root; the system temp location is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "rescache".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_dir: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Settings {
    /// Load settings from an optional YAML or JSON file, then apply
    /// environment overrides from the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::load_with_env(path, &env)
    }

    /// Same as [`Settings::load`] with an explicit environment map.
    pub fn load_with_env(path: Option<&Path>, env: &HashMap<String, String>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env(env)?;
        Ok(settings)
    }

    /// Parse a settings file.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for extensions other than JSON/YAML and
    /// `SettingsParse` when the contents do not match the schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        read_data_file_as(path).map_err(|e| match e {
            CacheError::Decode { message, .. } => CacheError::SettingsParse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Apply `RESCACHE_*` overrides.
    pub fn apply_env(&mut self, env: &HashMap<String, String>) -> Result<()> {
        if let Some(dir) = env.get(ENV_CACHE_DIR).filter(|d| !d.is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir));
        }

        if let Some(timeout) = env.get(ENV_TIMEOUT) {
            self.timeout_secs = timeout.trim().parse().map_err(|_| CacheError::SettingsParse {
                path: PathBuf::from(ENV_TIMEOUT),
                message: format!("expected a number of seconds, got '{}'", timeout),
            })?;
        }

        Ok(())
    }

    /// Cache root to use.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    /// HTTP timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the HTTP client these settings describe.
    pub fn fetcher(&self) -> Result<HttpFetcher> {
        HttpFetcher::build(&self.user_agent, self.timeout())
    }
}
