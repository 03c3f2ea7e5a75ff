//! Default-value derivation from a schema
//!
//! `compute_defaults` is total: every schema node, however nested, yields a
//! value with no failure path. Primitives map to their zero value, arrays to
//! an empty sequence, descriptors to their declared default (or the first
//! allowed value), and object schemas recurse per key.

use serde_json::{Map, Value};

use super::node::Schema;

/// Derive the default value for a schema node.
pub fn compute_defaults(schema: &Schema) -> Value {
    match schema {
        Schema::Text => Value::String(String::new()),
        Schema::Number => Value::from(0),
        Schema::Flag => Value::Bool(false),
        Schema::Array(_) => Value::Array(Vec::new()),
        Schema::Field(descriptor) => {
            if let Some(default) = descriptor.default_value() {
                return default.clone();
            }
            if let Some(first) = descriptor.allowed().and_then(|values| values.first()) {
                return first.clone();
            }
            compute_defaults(descriptor.kind())
        }
        Schema::Object(entries) => {
            let mut defaults = Map::new();
            for (key, node) in entries {
                defaults.insert(key.clone(), compute_defaults(node));
            }
            Value::Object(defaults)
        }
        Schema::Any => Value::Object(Map::new()),
    }
}
