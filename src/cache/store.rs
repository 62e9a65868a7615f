//! The resource cache.

use chrono::{DateTime, Utc};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::entry::{ResolvedEntry, StoredEntry};
use super::key::CacheKey;
use crate::config::Settings;
use crate::error::{CacheError, Result};
use crate::fetch::HttpFetcher;
use crate::glob;

/// Placeholder substituted by the parameter in a request template.
pub const PLACEHOLDER: &str = "{}";

/// Disk-backed cache of HTTP resources addressed by a URL template.
///
/// # Example
///
/// ```no_run
/// use rescache::cache::ResourceCache;
///
/// let cache = ResourceCache::new(
///     "https://licenses.opendefinition.org/licenses/groups/{}.json",
///     std::env::temp_dir().join("rescache"),
/// )
/// .unwrap();
///
/// // The first call fetches, later calls read from disk.
/// let licenses = cache.get("osi").unwrap();
/// ```
#[derive(Debug)]
pub struct ResourceCache {
    /// Request template with one `{}` slot.
    template: String,
    /// Namespace of this template's entries.
    key: CacheKey,
    /// Directory holding the entry files.
    root: PathBuf,
    /// Transport used on cache misses.
    fetcher: HttpFetcher,
}

impl ResourceCache {
    /// Create a cache for `template` stored under `root`, with a default
    /// HTTP client.
    pub fn new(template: impl Into<String>, root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_fetcher(template, root, HttpFetcher::new()?)
    }

    /// Create a cache using an already configured fetcher.
    pub fn with_fetcher(
        template: impl Into<String>,
        root: impl Into<PathBuf>,
        fetcher: HttpFetcher,
    ) -> Result<Self> {
        let template = template.into();
        check_template(&template)?;

        let root = root.into();
        fs::create_dir_all(&root)?;

        let key = CacheKey::from_template(&template);
        tracing::debug!("Cache {} for {} at {}", key, template, root.display());

        Ok(Self {
            template,
            key,
            root,
            fetcher,
        })
    }

    /// Create a cache whose location and HTTP client come from settings.
    pub fn from_settings(template: impl Into<String>, settings: &Settings) -> Result<Self> {
        Self::with_fetcher(template, settings.resolved_cache_dir(), settings.fetcher()?)
    }

    /// The request template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The namespace key derived from the template.
    pub fn cache_key(&self) -> &CacheKey {
        &self.key
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.root
    }

    /// Work out the entry path and request target for `parameter`.
    ///
    /// Touches neither the disk nor the network.
    pub fn resolve(&self, parameter: &str) -> ResolvedEntry {
        entry_for(&self.template, &self.key, &self.root, parameter)
    }

    /// Whether the entry for `parameter` is on disk.
    pub fn is_cached(&self, parameter: &str) -> bool {
        self.resolve(parameter).path.is_file()
    }

    /// Fetch `target` once, bypassing the cache entirely.
    pub fn fetch(&self, target: &str) -> Result<Vec<u8>> {
        tracing::info!("Fetching {}", target);
        self.fetcher.fetch(target)
    }

    /// Return the content for `parameter`, fetching and storing it on the
    /// first request.
    pub fn get(&self, parameter: &str) -> Result<Vec<u8>> {
        let entry = self.resolve(parameter);

        match fs::read(&entry.path) {
            Ok(bytes) => {
                tracing::debug!("Cache hit for {} ({})", entry.target, entry.path.display());
                return Ok(bytes);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Cache miss for {}", entry.target);
            }
            Err(e) => return Err(e.into()),
        }

        let bytes = self.fetch(&entry.target)?;
        self.store(&entry.path, &bytes)?;
        Ok(bytes)
    }

    /// Remove cached entries.
    ///
    /// With a parameter, removes exactly that entry and fails with
    /// [`CacheError::EntryNotFound`] when it is absent. Without one, removes
    /// every entry of this template; finding nothing is not an error.
    /// Returns the number of files deleted.
    pub fn remove(&self, parameter: Option<&str>) -> Result<usize> {
        match parameter {
            Some(parameter) => {
                let path = self.resolve(parameter).path;
                match fs::remove_file(&path) {
                    Ok(()) => {
                        tracing::debug!("Removed {}", path.display());
                        Ok(1)
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        Err(CacheError::EntryNotFound { path })
                    }
                    Err(e) => Err(e.into()),
                }
            }
            None => self.remove_all(),
        }
    }

    fn remove_all(&self) -> Result<usize> {
        let removed = remove_files(self.namespace_files()?)?;
        tracing::debug!("Removed {} entries for {}", removed, self.template);
        Ok(removed)
    }

    /// List the entries of this template currently on disk.
    pub fn entries(&self) -> Result<Vec<StoredEntry>> {
        let mut entries = Vec::new();

        for path in self.namespace_files()? {
            let metadata = match fs::metadata(&path) {
                Ok(m) => m,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            let param_key = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| self.key.param_key_of(n))
                .unwrap_or_default()
                .to_string();

            entries.push(StoredEntry {
                path,
                param_key,
                size_bytes: metadata.len(),
                modified: DateTime::<Utc>::from(metadata.modified()?),
            });
        }

        Ok(entries)
    }

    fn namespace_files(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.key.namespace_pattern();
        Ok(glob::glob_dir(&self.root, &pattern)?
            .into_iter()
            .filter(|p| p.is_file())
            .collect())
    }

    /// Write through a temporary sibling and rename, so a reader never sees
    /// a partial file.
    fn store(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.persist(path).map_err(|e| e.error)?;

        tracing::debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Work out where `template` would cache `parameter` under `root`, without
/// building a cache.
///
/// Unlike [`ResourceCache::new`] this neither creates `root` nor sets up an
/// HTTP client.
pub fn resolve_entry(template: &str, root: &Path, parameter: &str) -> Result<ResolvedEntry> {
    check_template(template)?;
    let key = CacheKey::from_template(template);
    Ok(entry_for(template, &key, root, parameter))
}

fn check_template(template: &str) -> Result<()> {
    let placeholders = template.matches(PLACEHOLDER).count();
    if placeholders != 1 {
        return Err(CacheError::InvalidTemplate {
            template: template.to_string(),
            placeholders,
        });
    }
    Ok(())
}

fn entry_for(template: &str, key: &CacheKey, root: &Path, parameter: &str) -> ResolvedEntry {
    ResolvedEntry {
        path: root.join(key.entry_file_name(parameter)),
        target: template.replacen(PLACEHOLDER, parameter, 1),
    }
}

/// Delete `paths`, skipping any that another process removed first.
/// Returns how many this call deleted.
fn remove_files(paths: Vec<PathBuf>) -> Result<usize> {
    let mut removed = 0;

    for path in paths {
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("{} vanished before removal", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(removed)
}
