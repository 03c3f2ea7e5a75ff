//! Canonical schema for a branch configuration document
//!
//! This is the shape a persisted branch record's configuration is validated
//! against before merging: activation flags, the deploy key pair (carried
//! unchecked), the plugin list, and the runner descriptor.

use serde_json::{json, Value};

use super::defaults::compute_defaults;
use super::node::{FieldDescriptor, Schema};

/// Runner ids a branch may select.
pub const RUNNER_IDS: &[&str] = &["simple-runner", "docker-runner"];

/// The branch configuration schema.
pub fn branch_schema() -> Schema {
    Schema::object([
        ("active", Schema::Flag),
        (
            "deploy_on_green",
            Schema::Field(FieldDescriptor::new(Schema::Flag).with_default(json!(true))),
        ),
        ("public", Schema::Flag),
        ("privkey", Schema::Any),
        ("pubkey", Schema::Any),
        (
            "plugins",
            Schema::array(Schema::object([
                ("id", Schema::Text),
                (
                    "enabled",
                    Schema::Field(FieldDescriptor::new(Schema::Flag).with_default(json!(true))),
                ),
                ("config", Schema::Any),
            ])),
        ),
        (
            "runner",
            Schema::object([
                (
                    "id",
                    Schema::Field(
                        FieldDescriptor::new(Schema::Text)
                            .with_allowed(RUNNER_IDS.iter().map(|id| json!(id)).collect()),
                    ),
                ),
                ("config", Schema::Any),
            ]),
        ),
    ])
}

/// Defaults derived from [`branch_schema`].
pub fn branch_defaults() -> Value {
    compute_defaults(&branch_schema())
}
