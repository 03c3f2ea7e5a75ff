//! Branch record resolution
//!
//! Branch records are scanned in insertion order; names may contain `*`
//! wildcards. A wildcard pattern earlier in the list must not shadow an
//! exact-name record later in the list, so resolution is two-pass: first
//! pattern match wins tentatively, then an exact-name record anywhere in the
//! list is preferred over a wildcard hit.

use regex_lite::Regex;
use serde_json::Value;

/// Find the branch record matching `name`, preferring an exact-name record
/// over a wildcard match regardless of list order. `None` when no record
/// matches.
pub fn find_branch<'a>(branches: &'a [Value], name: &str) -> Option<&'a Value> {
    let candidate = branches
        .iter()
        .find(|record| branch_name(record).is_some_and(|pattern| pattern_matches(pattern, name)))?;

    if branch_name(candidate) == Some(name) {
        return Some(candidate);
    }

    branches
        .iter()
        .find(|record| branch_name(record) == Some(name))
        .or(Some(candidate))
}

/// The record's `name` field, when present and a string.
pub fn branch_name(record: &Value) -> Option<&str> {
    record.get("name").and_then(Value::as_str)
}

/// Full-string match of `name` against a `*`-wildcard pattern.
///
/// Each `*` matches any run of characters; every other character matches
/// literally. Patterns that fail to compile match nothing.
fn pattern_matches(pattern: &str, name: &str) -> bool {
    Regex::new(&pattern_to_regex(pattern))
        .map(|re| re.is_match(name))
        .unwrap_or(false)
}

/// Translate a wildcard pattern to an anchored regular expression, escaping
/// every metacharacter other than `*`.
fn pattern_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => regex.push_str(".*"),
            '.' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                regex.push('\\');
                regex.push(ch);
            }
            other => regex.push(other),
        }
    }
    regex.push('$');
    regex
}
