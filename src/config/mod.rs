//! Configuration merge system
//!
//! Resolves one configuration from two partially-trusted sources: the
//! branch-level configuration from a persisted record and an override
//! document from the repository. Scalars merge shallowly (override wins);
//! plugin lists merge by id, strictly when the override asks for it.

mod loader;
mod merge;

pub use loader::{load_override, LoadError, OverrideDocument};
pub use merge::{merge_configs, merge_plugins};
