use serde_json::Value;

/// An ordered sequence of keys walked from the payload root.
///
/// Numeric segments index into arrays, so `["stringInputs", "value", "0"]`
/// reaches the first element of a `value` list.
pub type FieldPath = &'static [&'static str];

/// Returns the value at the first path in `paths` that resolves.
///
/// A path resolves when every lookup along it finds a present, non-null value
/// and the final value is not an empty string. Missing intermediate keys are
/// an ordinary outcome: the path is skipped and the next one is tried.
pub fn extract<'a>(payload: &'a Value, paths: &[FieldPath]) -> Option<&'a Value> {
    paths.iter().find_map(|path| resolve(payload, path))
}

/// Like [`extract`], but only accepts non-empty string values.
///
/// Used for identifiers such as `space.name`, where an object or number at
/// the path is as good as absent.
pub fn extract_str<'a>(payload: &'a Value, paths: &[FieldPath]) -> Option<&'a str> {
    paths
        .iter()
        .filter_map(|path| resolve(payload, path))
        .find_map(|value| value.as_str().filter(|s| !s.is_empty()))
}

fn resolve<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = payload;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }

    match current {
        Value::String(s) if s.is_empty() => None,
        _ => Some(current),
    }
}
