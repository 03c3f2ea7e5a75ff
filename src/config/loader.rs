//! Override document loading
//!
//! The override configuration lives in the repository as `.branchcfg.json`
//! or `branchcfg.toml`. Loading keeps a SHA-256 digest of the raw bytes so
//! the resolved configuration can record where each layer came from.

use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Errors for override document loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read override file: {0}")]
    Io(String),

    #[error("failed to parse override file: {0}")]
    Parse(String),
}

/// An override document read from a repository file.
#[derive(Debug, Clone)]
pub struct OverrideDocument {
    /// Parsed configuration
    pub config: Value,

    /// Path the document was read from
    pub path: String,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

/// Load an override document, parsing JSON or TOML by file extension.
pub fn load_override(path: &Path) -> Result<OverrideDocument, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::Io(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    let contents =
        String::from_utf8(bytes).map_err(|e| LoadError::Parse(format!("invalid UTF-8: {}", e)))?;

    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let config = if is_toml {
        let value: toml::Value = toml::from_str(&contents)
            .map_err(|e| LoadError::Parse(format!("TOML parse error: {}", e)))?;
        toml_to_json(value)
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| LoadError::Parse(format!("JSON parse error: {}", e)))?
    };

    Ok(OverrideDocument {
        config,
        path: path.to_string_lossy().to_string(),
        digest,
    })
}

/// Convert a TOML value to a JSON value.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            Value::Object(map)
        }
    }
}
