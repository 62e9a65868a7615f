//! Structured data files.
//!
//! Reads and writes JSON or YAML documents, picking the format from the
//! file extension. Documents are exchanged as [`serde_json::Value`] so the
//! same logical document round-trips through either format.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{CacheError, Result};

/// Serialization format of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Guess the format from a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DataFormat::Json),
            Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
            _ => Err(CacheError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => write!(f, "JSON"),
            DataFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Decode bytes in the given format.
pub fn decode(bytes: &[u8], format: DataFormat) -> Result<Value> {
    decode_as(bytes, format, &format.to_string())
}

/// Encode a value in the given format.
///
/// JSON is pretty-printed with two-space indentation.
pub fn encode<T: Serialize + ?Sized>(value: &T, format: DataFormat) -> Result<Vec<u8>> {
    let encoded = match format {
        DataFormat::Json => serde_json::to_vec_pretty(value).map_err(|e| e.to_string()),
        DataFormat::Yaml => serde_yaml::to_string(value)
            .map(String::into_bytes)
            .map_err(|e| e.to_string()),
    };

    encoded.map_err(|message| CacheError::Encode {
        format: format.to_string(),
        message,
    })
}

fn decode_as<T: DeserializeOwned>(bytes: &[u8], format: DataFormat, source: &str) -> Result<T> {
    let decoded = match format {
        DataFormat::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        DataFormat::Yaml => decode_yaml(bytes),
    };

    decoded.map_err(|message| CacheError::Decode {
        source_name: source.to_string(),
        message,
    })
}

/// YAML goes through its own value tree first: anything JSON cannot
/// represent is an error instead of silently becoming null or a string key.
fn decode_yaml<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, String> {
    let value: serde_yaml::Value = serde_yaml::from_slice(bytes).map_err(|e| e.to_string())?;
    check_json_compatible(&value, "$")?;
    serde_yaml::from_value(value).map_err(|e| e.to_string())
}

fn check_json_compatible(value: &serde_yaml::Value, at: &str) -> std::result::Result<(), String> {
    match value {
        serde_yaml::Value::Number(n) if n.is_nan() || n.is_infinite() => {
            Err(format!("non-finite number {} at {}", n, at))
        }
        serde_yaml::Value::Sequence(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check_json_compatible(item, &format!("{}[{}]", at, i))),
        serde_yaml::Value::Mapping(map) => map.iter().try_for_each(|(key, item)| match key {
            serde_yaml::Value::String(name) => {
                check_json_compatible(item, &format!("{}.{}", at, name))
            }
            other => Err(format!(
                "non-string mapping key {} at {}",
                serde_yaml::to_string(other)
                    .map(|k| k.trim_end().to_string())
                    .unwrap_or_else(|_| format!("{:?}", other)),
                at
            )),
        }),
        serde_yaml::Value::Tagged(tagged) => check_json_compatible(&tagged.value, at),
        _ => Ok(()),
    }
}

/// Read a JSON or YAML file.
pub fn read_data_file(path: &Path) -> Result<Value> {
    read_data_file_as(path)
}

/// Read a JSON or YAML file straight into a typed value.
pub fn read_data_file_as<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DataFormat::from_path(path)?;
    let bytes = fs::read(path)?;
    decode_as(&bytes, format, &path.display().to_string())
}

/// Write a value to a JSON or YAML file, creating parent directories.
pub fn write_data_file<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let format = DataFormat::from_path(path)?;
    let bytes = encode(data, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;

    tracing::debug!("Wrote {} file {}", format, path.display());
    Ok(())
}
