//! Effective branch configuration with provenance
//!
//! Resolution layers three sources in precedence order:
//! 1. schema defaults
//! 2. the matched branch record, validated against the schema
//! 3. the repository override document
//!
//! The result captures the merged configuration plus information about where
//! each layer came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::branches::{branch_name, find_branch};
use crate::config::{merge_configs, OverrideDocument};
use crate::schema::{compute_defaults, validate, Schema};

/// Schema version for the resolved artifact
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "branchcfg/effective_config@1";

/// Origin of a configuration layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Defaults,
    Branch,
    Override,
}

/// A contributing configuration layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this layer
    pub origin: ConfigOrigin,

    /// Branch record name or file path (None for defaults)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the override file bytes (None otherwise)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Resolved branch configuration with full provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveBranchConfig {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When this configuration was resolved
    pub created_at: DateTime<Utc>,

    /// Name of the matched branch record (may be a wildcard pattern)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// The merged configuration object
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveBranchConfig {
    /// Resolve the effective configuration for `name`.
    ///
    /// Every layer is optional beyond the defaults: an unmatched branch or a
    /// missing override document simply contributes nothing.
    pub fn build(
        schema: &Schema,
        branches: &[Value],
        name: &str,
        override_doc: Option<&OverrideDocument>,
    ) -> Self {
        let mut config = compute_defaults(schema);
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Defaults,
            path: None,
            digest: None,
        }];
        let mut matched = None;

        if let Some(record) = find_branch(branches, name) {
            matched = branch_name(record).map(str::to_string);
            if let Some(validated) = validate(record, schema) {
                config = merge_configs(&config, &validated);
                sources.push(ConfigSource {
                    origin: ConfigOrigin::Branch,
                    path: matched.clone(),
                    digest: None,
                });
            }
        }

        if let Some(doc) = override_doc {
            config = merge_configs(&config, &doc.config);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Override,
                path: Some(doc.path.clone()),
                digest: Some(doc.digest.clone()),
            });
        }

        Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            branch: matched,
            config,
            sources,
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get a config value by dot-separated path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.config;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Get a config value as string
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    /// Get a config value as bool
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    /// Get a config value as u64
    pub fn get_u64(&self, path: &str) -> Option<u64> {
        self.get(path).and_then(|v| v.as_u64())
    }
}
