use crate::path::{FieldPath, extract};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Submitted form fields, flattened to strings. The first source to set a
/// non-empty value for a key keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormValues(HashMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` unless `key` already holds a non-empty value. Returns
    /// whether it was inserted.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.0.get(&key).is_some_and(|v| !v.is_empty()) {
            return false;
        }
        self.0.insert(key, value.into());
        true
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The first non-empty value among `keys`.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = FormValues::new();
        for (k, v) in iter {
            values.insert_if_absent(k, v);
        }
        values
    }
}

const ACTION_PARAMETERS: &[FieldPath] = &[&["action", "parameters"]];

const ACTION_INPUTS: &[FieldPath] = &[&["action", "inputs"], &["action", "formInputs"]];

const TOP_LEVEL_INPUTS: &[FieldPath] = &[&["inputs"]];

const COMMON_FORM_INPUTS: &[FieldPath] = &[
    &["commonEventObject", "formInputs"],
    &["common", "formInputs"],
    &["chat", "commonEventObject", "formInputs"],
];

/// Collects submitted form fields from every region the platform has used,
/// earlier regions taking precedence.
pub fn parse(raw: &Value) -> FormValues {
    let mut values = FormValues::new();

    if let Some(Value::Array(params)) = extract(raw, ACTION_PARAMETERS) {
        for param in params {
            let key = normalize_value(param.get("key").unwrap_or(&Value::Null));
            if key.is_empty() {
                continue;
            }
            values.insert_if_absent(key, normalize_value(param.get("value").unwrap_or(&Value::Null)));
        }
    }

    for paths in [ACTION_INPUTS, TOP_LEVEL_INPUTS] {
        if let Some(Value::Object(inputs)) = extract(raw, paths) {
            merge_object(&mut values, inputs, normalize_value);
        }
    }

    if let Some(Value::Object(inputs)) = extract(raw, COMMON_FORM_INPUTS) {
        merge_object(&mut values, inputs, normalize_form_input);
    }

    values
}

fn merge_object(values: &mut FormValues, inputs: &Map<String, Value>, resolve: fn(&Value) -> String) {
    for (key, value) in inputs {
        if key.is_empty() {
            continue;
        }
        values.insert_if_absent(key.as_str(), resolve(value));
    }
}

/// Resolves any field value to a plain string.
///
/// - null → `""`
/// - object with a `value` property → that property, resolved again
/// - non-empty array → its first element, resolved again
/// - anything else → its string form
pub fn normalize_value(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::Object(map) if map.contains_key("value") => normalize_value(&map["value"]),
        Value::Array(items) => items.first().map(normalize_value).unwrap_or_default(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A common-event form input wraps its value in `stringInputs` or
/// `selectionInput`.
fn normalize_form_input(raw: &Value) -> String {
    if let Some(string_inputs) = raw.get("stringInputs") {
        return normalize_value(string_inputs);
    }
    if let Some(Value::Array(selected)) = raw.pointer("/selectionInput/selectedValues") {
        return selected
            .iter()
            .map(normalize_value)
            .collect::<Vec<_>>()
            .join(", ");
    }
    normalize_value(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::fields;
    use serde_json::json;

    #[test]
    fn test_normalize_value_rules() {
        assert_eq!(normalize_value(&Value::Null), "");
        assert_eq!(normalize_value(&json!("plain")), "plain");
        assert_eq!(normalize_value(&json!({ "value": "wrapped" })), "wrapped");
        assert_eq!(normalize_value(&json!(["first", "second"])), "first");
        assert_eq!(normalize_value(&json!({ "value": ["nested", "x"] })), "nested");
        assert_eq!(normalize_value(&json!([{ "value": "deep" }])), "deep");
        assert_eq!(normalize_value(&json!({ "value": null })), "");
        assert_eq!(normalize_value(&json!([])), "");
        assert_eq!(normalize_value(&json!(42)), "42");
        assert_eq!(normalize_value(&json!(true)), "true");
        assert_eq!(normalize_value(&json!({ "other": 1 })), r#"{"other":1}"#);
    }

    #[test]
    fn test_every_encoding_yields_same_value() {
        let expected = "a@b.com";
        let payloads = [
            json!({ "action": { "parameters": [{ "key": "email", "value": expected }] } }),
            json!({ "action": { "inputs": { "email": { "value": [expected] } } } }),
            json!({ "inputs": { "email": [expected] } }),
            json!({
                "commonEventObject": {
                    "formInputs": { "email": { "stringInputs": { "value": [expected] } } }
                }
            }),
        ];

        for payload in &payloads {
            assert_eq!(parse(payload).get(fields::EMAIL), Some(expected), "payload: {}", payload);
        }
    }

    #[test]
    fn test_first_writer_wins() {
        let payload = json!({
            "action": {
                "parameters": [
                    { "key": "email", "value": "params@x.com" },
                    { "key": "email", "value": "later@x.com" }
                ],
                "inputs": { "email": "inputs@x.com", "prospectName": "Ada" }
            },
            "inputs": { "prospectName": "Grace", "response": "top" },
            "commonEventObject": {
                "formInputs": {
                    "response": { "stringInputs": { "value": ["common"] } },
                    "extra": { "stringInputs": { "value": ["only here"] } }
                }
            }
        });

        let values = parse(&payload);
        assert_eq!(values.get("email"), Some("params@x.com"));
        assert_eq!(values.get("prospectName"), Some("Ada"));
        assert_eq!(values.get("response"), Some("top"));
        assert_eq!(values.get("extra"), Some("only here"));
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn test_empty_value_does_not_block_later_regions() {
        let payload = json!({
            "action": { "parameters": [{ "key": "email", "value": "" }] },
            "inputs": { "email": "x@y" }
        });
        assert_eq!(parse(&payload).get("email"), Some("x@y"));

        let mut values = FormValues::new();
        assert!(values.insert_if_absent("email", ""));
        assert!(values.insert_if_absent("email", "x@y"));
        assert!(!values.insert_if_absent("email", "z@y"));
        assert_eq!(values.get("email"), Some("x@y"));
    }

    #[test]
    fn test_parameters_without_key_are_skipped() {
        let payload = json!({
            "action": {
                "parameters": [
                    { "value": "orphan" },
                    { "key": "", "value": "blank" },
                    null,
                    { "key": "email" }
                ]
            }
        });

        let values = parse(&payload);
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("email"), Some(""));
    }

    #[test]
    fn test_selection_input_is_joined() {
        let payload = json!({
            "common": {
                "formInputs": {
                    "channels": { "selectionInput": { "selectedValues": ["email", "phone"] } }
                }
            }
        });
        assert_eq!(parse(&payload).get("channels"), Some("email, phone"));
    }

    #[test]
    fn test_missing_regions_give_empty_values() {
        assert!(parse(&json!({})).is_empty());
        assert!(parse(&json!({ "action": { "parameters": "nope" }, "inputs": [1, 2] })).is_empty());
        assert!(parse(&Value::Null).is_empty());
    }

    #[test]
    fn test_first_of_skips_empty() {
        let values: FormValues = [("prospectName", ""), ("prospect_name", "Ada")]
            .into_iter()
            .collect();
        assert_eq!(
            values.first_of(&[fields::PROSPECT_NAME, fields::PROSPECT_NAME_ALIAS]),
            Some("Ada")
        );
        assert_eq!(values.first_of(&[fields::EMAIL]), None);
    }
}
