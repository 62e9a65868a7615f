//! Cache key derivation.
//!
//! Keys are truncated SHA-256 digests of UTF-8 text, hex encoded, so they
//! are filesystem-safe and stable across runs and platforms.

use sha2::{Digest, Sha256};
use std::fmt;

/// Number of digest bytes kept in a key (hex doubles this).
pub const KEY_BYTES: usize = 16;

/// Scheme prefix shared by every entry file name.
pub const ENTRY_PREFIX: &str = "http";

/// Digest of a request template; namespaces all entries of that template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a request template.
    pub fn from_template(template: &str) -> Self {
        Self(digest_hex(template))
    }

    /// Hex form of the key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the entry for `parameter` in this namespace.
    pub fn entry_file_name(&self, parameter: &str) -> String {
        format!("{}-{}-{}", ENTRY_PREFIX, self.0, param_key(parameter))
    }

    /// Glob pattern matching every entry file in this namespace.
    pub fn namespace_pattern(&self) -> String {
        format!("{}-{}-*", ENTRY_PREFIX, self.0)
    }

    /// Parameter key encoded in an entry file name, if the name belongs to
    /// this namespace.
    pub fn param_key_of<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_prefix(ENTRY_PREFIX)?
            .strip_prefix('-')?
            .strip_prefix(self.0.as_str())?
            .strip_prefix('-')
            .filter(|k| !k.is_empty())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Digest of a single parameter value.
pub fn param_key(parameter: &str) -> String {
    digest_hex(parameter)
}

fn digest_hex(input: &str) -> String {
    let hash = Sha256::digest(input.as_bytes());
    hex::encode(&hash[..KEY_BYTES])
}
