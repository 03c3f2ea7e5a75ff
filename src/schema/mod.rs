//! Schema engine
//!
//! Two public operations over one recursive schema grammar:
//! - `compute_defaults` derives a default value from a schema
//! - `validate` / `validate_object` coerce raw data against the same shape
//!
//! Both are total: malformed input degrades to a conservative value rather
//! than erroring.

mod builtin;
mod defaults;
mod node;
mod validate;

pub use builtin::{branch_defaults, branch_schema, RUNNER_IDS};
pub use defaults::compute_defaults;
pub use node::{FieldDescriptor, Schema};
pub use validate::{is_truthy, validate, validate_object};
