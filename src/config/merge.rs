//! Configuration merge logic
//!
//! Combines a branch-level configuration with an override document:
//! - Scalars and nested objects: shallow override (override field wins)
//! - Plugin lists: id-keyed merge, strict (replace) or field-level
//!
//! The override's `merge_plugins` flag selects whether the plugin lists are
//! merged strictly or the override's `plugins` field simply wins like any
//! other field.

use serde_json::{Map, Value};

use crate::schema::is_truthy;

/// Merge two plugin lists keyed by `id`.
///
/// The base list defines the output's membership and order; an override
/// entry with a matching id replaces the base entry wholesale (`strict`) or
/// shallow-merges over it, override fields winning. Override entries with no
/// matching base id are not appended. A missing side returns the other
/// unchanged.
pub fn merge_plugins(
    base: Option<&[Value]>,
    overlay: Option<&[Value]>,
    strict: bool,
) -> Vec<Value> {
    let (base, overlay) = match (base, overlay) {
        (None, None) => return Vec::new(),
        (None, Some(overlay)) => return overlay.to_vec(),
        (Some(base), None) => return base.to_vec(),
        (Some(base), Some(overlay)) => (base, overlay),
    };

    base.iter()
        .map(|entry| {
            let matched = plugin_id(entry).and_then(|id| {
                overlay.iter().find(|candidate| plugin_id(candidate) == Some(id))
            });
            match matched {
                None => entry.clone(),
                Some(replacement) if strict => replacement.clone(),
                Some(replacement) => merge_entry(entry, replacement),
            }
        })
        .collect()
}

/// Merge an override document over a branch-level configuration.
///
/// Shallow merge: every override field wins. When the override carries a
/// truthy `merge_plugins`, the `plugins` field is recomputed with a strict
/// id-keyed plugin merge instead of the shallow replacement. Non-object
/// inputs degrade to empty documents.
pub fn merge_configs(base: &Value, overlay: &Value) -> Value {
    let mut merged = Map::new();
    if let Some(fields) = base.as_object() {
        merged.extend(fields.clone());
    }
    if let Some(fields) = overlay.as_object() {
        for (key, value) in fields {
            merged.insert(key.clone(), value.clone());
        }
    }

    if overlay.get("merge_plugins").is_some_and(is_truthy) {
        let base_plugins = base.get("plugins").and_then(Value::as_array);
        let overlay_plugins = overlay.get("plugins").and_then(Value::as_array);
        if base_plugins.is_some() || overlay_plugins.is_some() {
            let plugins = merge_plugins(
                base_plugins.map(Vec::as_slice),
                overlay_plugins.map(Vec::as_slice),
                true,
            );
            merged.insert("plugins".to_string(), Value::Array(plugins));
        }
    }

    Value::Object(merged)
}

fn plugin_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

/// Shallow field merge of two plugin entries, replacement fields winning.
fn merge_entry(base: &Value, replacement: &Value) -> Value {
    let mut merged = Map::new();
    if let Some(fields) = base.as_object() {
        merged.extend(fields.clone());
    }
    match replacement.as_object() {
        Some(fields) => {
            for (key, value) in fields {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        None => replacement.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap_or_default()
    }

    #[test]
    fn test_missing_side_returns_the_other() {
        let list = entries(json!([{"id": "a", "enabled": true}]));

        assert_eq!(merge_plugins(None, Some(&list), false), list);
        assert_eq!(merge_plugins(Some(&list), None, false), list);
        assert!(merge_plugins(None, None, false).is_empty());
    }

    #[test]
    fn test_field_level_merge_retains_base_extras() {
        let base = entries(json!([{"id": "a", "enabled": true, "extra": 9}]));
        let overlay = entries(json!([{"id": "a", "enabled": false}]));

        let merged = merge_plugins(Some(&base), Some(&overlay), false);
        assert_eq!(merged, entries(json!([{"id": "a", "enabled": false, "extra": 9}])));
    }

    #[test]
    fn test_strict_merge_replaces_wholesale() {
        let base = entries(json!([{"id": "a", "enabled": true, "extra": 9}]));
        let overlay = entries(json!([{"id": "a", "enabled": false}]));

        let merged = merge_plugins(Some(&base), Some(&overlay), true);
        assert_eq!(merged, entries(json!([{"id": "a", "enabled": false}])));
    }

    #[test]
    fn test_override_fields_win_per_field() {
        let base = entries(json!([{"id": "a", "enabled": true}]));
        let overlay = entries(json!([{"id": "a", "enabled": false, "opt": 1}]));

        let merged = merge_plugins(Some(&base), Some(&overlay), false);
        assert_eq!(merged, entries(json!([{"id": "a", "enabled": false, "opt": 1}])));
    }

    #[test]
    fn test_override_only_entries_are_not_appended() {
        let base = entries(json!([{"id": "a", "enabled": true}]));
        let overlay = entries(json!([
            {"id": "a", "enabled": false},
            {"id": "b", "enabled": true},
        ]));

        let merged = merge_plugins(Some(&base), Some(&overlay), false);
        assert_eq!(merged, entries(json!([{"id": "a", "enabled": false}])));
    }

    #[test]
    fn test_base_order_and_membership_define_the_output() {
        let base = entries(json!([
            {"id": "lint", "enabled": true},
            {"id": "deploy", "enabled": false},
        ]));
        let overlay = entries(json!([
            {"id": "deploy", "enabled": true},
        ]));

        let merged = merge_plugins(Some(&base), Some(&overlay), false);
        assert_eq!(
            merged,
            entries(json!([
                {"id": "lint", "enabled": true},
                {"id": "deploy", "enabled": true},
            ]))
        );
    }

    #[test]
    fn test_first_overlay_id_match_wins() {
        let base = entries(json!([{"id": "a", "v": 0}]));
        let overlay = entries(json!([{"id": "a", "v": 1}, {"id": "a", "v": 2}]));

        let merged = merge_plugins(Some(&base), Some(&overlay), true);
        assert_eq!(merged, entries(json!([{"id": "a", "v": 1}])));
    }

    #[test]
    fn test_shallow_merge_override_wins() {
        let merged = merge_configs(&json!({"a": 1}), &json!({"a": 2, "merge_plugins": false}));
        assert_eq!(merged, json!({"a": 2, "merge_plugins": false}));
    }

    #[test]
    fn test_shallow_merge_preserves_base_only_fields() {
        let merged = merge_configs(&json!({"a": 1, "b": 2}), &json!({"b": 3}));
        assert_eq!(merged, json!({"a": 1, "b": 3}));
    }

    #[test]
    fn test_plugins_win_shallow_without_merge_flag() {
        let base = json!({"plugins": [{"id": "a", "enabled": true, "extra": 9}]});
        let overlay = json!({"plugins": [{"id": "a", "enabled": false}]});

        let merged = merge_configs(&base, &overlay);
        assert_eq!(merged["plugins"], json!([{"id": "a", "enabled": false}]));
    }

    #[test]
    fn test_merge_plugins_flag_forces_strict_list_merge() {
        let base = json!({"plugins": [
            {"id": "a", "enabled": true, "extra": 9},
            {"id": "b", "enabled": true},
        ]});
        let overlay = json!({
            "merge_plugins": true,
            "plugins": [
                {"id": "a", "enabled": false},
                {"id": "c", "enabled": true},
            ],
        });

        let merged = merge_configs(&base, &overlay);
        // Strict: a replaced wholesale, b kept, override-only c not appended.
        assert_eq!(
            merged["plugins"],
            json!([
                {"id": "a", "enabled": false},
                {"id": "b", "enabled": true},
            ])
        );
    }

    #[test]
    fn test_non_object_inputs_degrade_to_empty_documents() {
        assert_eq!(merge_configs(&json!(null), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(merge_configs(&json!({"a": 1}), &json!("junk")), json!({"a": 1}));
        assert_eq!(merge_configs(&json!(4), &json!(null)), json!({}));
    }
}
