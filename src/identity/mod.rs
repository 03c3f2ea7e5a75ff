//! Identity helpers
//!
//! Avatar URL generation and creation-time derivation from record ids. Both
//! are pure transforms consumed at the core boundary.

use chrono::{DateTime, TimeZone, Utc};
use sha2::{Digest, Sha256};

/// Avatar URL for an email address.
///
/// The address is trimmed and lowercased before hashing, and the URL always
/// requests the identicon fallback image over the secure endpoint.
pub fn avatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("https://secure.gravatar.com/avatar/{}?d=identicon", digest)
}

/// Creation time embedded in a record id: the first 8 hex characters read as
/// Unix-epoch seconds. `None` for ids too short or not hex.
pub fn time_from_id(id: &str) -> Option<DateTime<Utc>> {
    let prefix = id.get(..8)?;
    let seconds = u32::from_str_radix(prefix, 16).ok()?;
    Utc.timestamp_opt(i64::from(seconds), 0).single()
}
