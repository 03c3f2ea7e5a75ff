//! Validation and coercion of raw values against a schema
//!
//! The walk never fails and never panics: unrecognized or malformed input
//! degrades to a conservative value (`None`, `{}`, `[]`, `0`, `false`)
//! instead of signaling an error. Callers decide whether a dropped or
//! defaulted field is an application-level problem.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::node::Schema;

/// Validate and coerce a value against a schema node.
///
/// `None` means the value was rejected (an enum-constrained field whose
/// coerced value is not a member); when validating a whole object the caller
/// drops the key.
pub fn validate(value: &Value, schema: &Schema) -> Option<Value> {
    match schema {
        Schema::Text => Some(Value::String(coerce_text(value))),
        Schema::Number => Some(coerce_number(value)),
        Schema::Flag => Some(Value::Bool(is_truthy(value))),
        Schema::Array(element) => match value.as_array() {
            None => Some(Value::Array(Vec::new())),
            Some(items) => Some(Value::Array(
                items
                    .iter()
                    .filter_map(|item| validate(item, element))
                    .collect(),
            )),
        },
        Schema::Field(descriptor) => {
            let coerced = validate(value, descriptor.kind())?;
            if let Some(allowed) = descriptor.allowed() {
                if !allowed.contains(&coerced) {
                    return None;
                }
            }
            Some(coerced)
        }
        Schema::Any => Some(value.clone()),
        Schema::Object(entries) => {
            if value.is_object() {
                Some(validate_object(value, entries))
            } else {
                Some(Value::Object(Map::new()))
            }
        }
    }
}

/// Validate every key of `value` that the object schema names.
///
/// Keys absent from the schema are silently dropped; keys absent from the
/// value are not added (defaulting is the separate `compute_defaults` step);
/// keys whose validation yields `None` are dropped. Non-object input yields
/// an empty mapping.
pub fn validate_object(value: &Value, schema: &BTreeMap<String, Schema>) -> Value {
    let mut validated = Map::new();
    if let Some(fields) = value.as_object() {
        for (key, raw) in fields {
            if let Some(node) = schema.get(key) {
                if let Some(coerced) = validate(raw, node) {
                    validated.insert(key.clone(), coerced);
                }
            }
        }
    }
    Value::Object(validated)
}

/// Truthiness of a JSON value: `null` and `false` are false, zero and the
/// empty string are false, arrays and objects are always true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stringify a value. `null` coerces to the empty string; composites render
/// as compact JSON text.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Coerce a value to a number. Numeric strings parse (integers stay
/// integers), booleans map to 1/0, anything else degrades to 0.
fn coerce_number(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(n.clone()),
        Value::Bool(flag) => Value::from(if *flag { 1 } else { 0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                return Value::from(int);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::from(0))
        }
        _ => Value::from(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::node::FieldDescriptor;
    use serde_json::json;

    #[test]
    fn test_text_coercion() {
        assert_eq!(validate(&json!("ready"), &Schema::Text), Some(json!("ready")));
        assert_eq!(validate(&json!(12), &Schema::Text), Some(json!("12")));
        assert_eq!(validate(&json!(true), &Schema::Text), Some(json!("true")));
        assert_eq!(validate(&Value::Null, &Schema::Text), Some(json!("")));
    }

    #[test]
    fn test_number_coercion_uses_the_value() {
        assert_eq!(validate(&json!(7), &Schema::Number), Some(json!(7)));
        assert_eq!(validate(&json!("42"), &Schema::Number), Some(json!(42)));
        assert_eq!(validate(&json!("2.5"), &Schema::Number), Some(json!(2.5)));
        assert_eq!(validate(&json!(true), &Schema::Number), Some(json!(1)));
        assert_eq!(validate(&json!("not a number"), &Schema::Number), Some(json!(0)));
        assert_eq!(validate(&Value::Null, &Schema::Number), Some(json!(0)));
    }

    #[test]
    fn test_flag_coercion_is_truthiness() {
        assert_eq!(validate(&json!("yes"), &Schema::Flag), Some(json!(true)));
        assert_eq!(validate(&json!(""), &Schema::Flag), Some(json!(false)));
        assert_eq!(validate(&json!(0), &Schema::Flag), Some(json!(false)));
        assert_eq!(validate(&json!([]), &Schema::Flag), Some(json!(true)));
        assert_eq!(validate(&Value::Null, &Schema::Flag), Some(json!(false)));
    }

    #[test]
    fn test_non_array_input_coerces_to_empty_sequence() {
        let schema = Schema::array(Schema::Number);
        assert_eq!(validate(&json!("not-an-array"), &schema), Some(json!([])));
    }

    #[test]
    fn test_array_elements_map_through_element_schema() {
        let schema = Schema::array(Schema::Number);
        assert_eq!(
            validate(&json!(["3", 4, false]), &schema),
            Some(json!([3, 4, 0]))
        );
    }

    #[test]
    fn test_array_drops_rejected_elements() {
        let element = Schema::Field(
            FieldDescriptor::new(Schema::Text).with_allowed(vec![json!("a"), json!("b")]),
        );
        let schema = Schema::array(element);
        assert_eq!(
            validate(&json!(["a", "c", "b"]), &schema),
            Some(json!(["a", "b"]))
        );
    }

    #[test]
    fn test_enum_miss_rejects_the_field() {
        let schema = Schema::Field(
            FieldDescriptor::new(Schema::Text).with_allowed(vec![json!("a"), json!("b")]),
        );
        assert_eq!(validate(&json!("c"), &schema), None);
        assert_eq!(validate(&json!("a"), &schema), Some(json!("a")));
    }

    #[test]
    fn test_enum_checks_the_coerced_value() {
        // 1 coerces to "1" before the membership test.
        let schema = Schema::Field(
            FieldDescriptor::new(Schema::Text).with_allowed(vec![json!("1")]),
        );
        assert_eq!(validate(&json!(1), &schema), Some(json!("1")));
    }

    #[test]
    fn test_unchecked_schema_passes_value_through() {
        let value = json!({"anything": ["goes", 1, null]});
        assert_eq!(validate(&value, &Schema::Any), Some(value.clone()));
    }

    #[test]
    fn test_non_object_against_object_schema_yields_empty_mapping() {
        let schema = Schema::object([("active", Schema::Flag)]);
        assert_eq!(validate(&json!("scalar"), &schema), Some(json!({})));
    }

    #[test]
    fn test_object_validation_drops_unknown_keys() {
        let schema = Schema::object([("active", Schema::Flag), ("label", Schema::Text)]);
        let result = validate(
            &json!({"active": 1, "label": "web", "rogue": "dropped"}),
            &schema,
        );
        assert_eq!(result, Some(json!({"active": true, "label": "web"})));
    }

    #[test]
    fn test_object_validation_does_not_add_missing_keys() {
        let schema = Schema::object([("active", Schema::Flag), ("label", Schema::Text)]);
        let result = validate(&json!({"active": true}), &schema);
        assert_eq!(result, Some(json!({"active": true})));
    }

    #[test]
    fn test_enum_miss_drops_key_from_object_result() {
        let schema = Schema::object([(
            "runner",
            Schema::Field(
                FieldDescriptor::new(Schema::Text)
                    .with_allowed(vec![json!("simple"), json!("docker")]),
            ),
        )]);
        let result = validate(&json!({"runner": "other"}), &schema);
        assert_eq!(result, Some(json!({})));
    }

    #[test]
    fn test_truthiness_table() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!(2)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }
}
