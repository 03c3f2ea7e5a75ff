//! branchcfg - schema-driven branch configuration resolution
//!
//! This crate resolves a final, effective configuration object from multiple
//! partially-trusted sources: a persisted branch record, a repository
//! override document, and a declarative schema describing the allowed shape.

pub mod branches;
pub mod config;
pub mod identity;
pub mod resolve;
pub mod sanitize;
pub mod schema;

pub use branches::find_branch;
pub use config::{load_override, merge_configs, merge_plugins, LoadError, OverrideDocument};
pub use resolve::{ConfigOrigin, ConfigSource, EffectiveBranchConfig};
pub use schema::{
    branch_defaults, branch_schema, compute_defaults, validate, validate_object, FieldDescriptor,
    Schema,
};
