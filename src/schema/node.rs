//! Schema grammar for configuration shape descriptions
//!
//! A schema node is one of:
//! - a primitive marker (`Text`, `Number`, `Flag`)
//! - an array marker wrapping exactly one element schema
//! - a field descriptor carrying an underlying kind plus an optional
//!   allowed-value list and an optional default
//! - an object schema mapping field names to nested nodes
//! - `Any`, the unchecked passthrough (the empty object schema)

use serde_json::Value;
use std::collections::BTreeMap;

/// One node of the recursive shape-description grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Primitive string marker; values coerce to strings.
    Text,
    /// Primitive number marker; values coerce to numbers.
    Number,
    /// Primitive boolean marker; values coerce by truthiness.
    Flag,
    /// Ordered sequence; every element validates against the inner node.
    Array(Box<Schema>),
    /// Field descriptor: underlying kind plus optional constraints.
    Field(FieldDescriptor),
    /// Nested object schema; keys it does not name are dropped on validation.
    Object(BTreeMap<String, Schema>),
    /// Accept any value unchecked.
    Any,
}

impl Schema {
    /// Array marker wrapping `element`.
    pub fn array(element: Schema) -> Self {
        Schema::Array(Box::new(element))
    }

    /// Object schema from `(name, node)` entries.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Schema::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<FieldDescriptor> for Schema {
    fn from(descriptor: FieldDescriptor) -> Self {
        Schema::Field(descriptor)
    }
}

/// A schema node carrying an underlying kind plus an optional allowed-value
/// list and an optional default.
///
/// Invariant: the underlying kind is never itself a descriptor. `new`
/// flattens a descriptor argument to its inner kind, so the invariant holds
/// by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    kind: Box<Schema>,
    allowed: Option<Vec<Value>>,
    default: Option<Value>,
}

impl FieldDescriptor {
    /// Descriptor over `kind` with no constraints.
    pub fn new(kind: Schema) -> Self {
        let kind = match kind {
            Schema::Field(inner) => inner.kind,
            other => Box::new(other),
        };
        Self {
            kind,
            allowed: None,
            default: None,
        }
    }

    /// Restrict the field to an ordered list of allowed values.
    pub fn with_allowed(mut self, allowed: Vec<Value>) -> Self {
        self.allowed = Some(allowed);
        self
    }

    /// Set an explicit default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The underlying kind (never a descriptor).
    pub fn kind(&self) -> &Schema {
        &self.kind
    }

    /// Allowed values, if the field is enum-constrained.
    pub fn allowed(&self) -> Option<&[Value]> {
        self.allowed.as_deref()
    }

    /// Explicit default, if one was declared.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}
