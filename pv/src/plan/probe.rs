//! Field probing helpers for loosely-shaped plan documents
//!
//! The planning service is a generative system; nothing about its output
//! shape is contractually guaranteed. Every accessor here returns an
//! Option and treats null and empty-string values as absent, so section
//! builders can chain alternatives and take the first hit.

use serde_json::Value;
use tracing::trace;

/// Walk a key path into nested objects.
///
/// Returns None as soon as a step is missing or the current value is not
/// an object.
pub fn get<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = doc;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    Some(current)
}

/// Like [`get`], but filters out values that render as nothing: null and
/// the empty string.
pub fn present<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let value = get(doc, path)?;
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(other),
    }
}

/// Probe an ordered list of alternative paths; the first present value
/// wins. Alternatives are independent: a miss on one path never blocks
/// the next.
pub fn first_present<'a>(doc: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    trace!(alternatives = paths.len(), "first_present: called");
    paths.iter().find_map(|path| present(doc, path))
}

/// Non-empty string at a path, if the value is actually a string.
pub fn string_at<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a str> {
    present(doc, path)?.as_str()
}

/// Array at a path. A non-array value for a list field is treated as
/// absent, never coerced.
pub fn array_at<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    get(doc, path)?.as_array()
}

/// Stringify a value for display: strings verbatim, everything else as
/// compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Array at a path flattened to display strings, only when array-shaped
/// and non-empty.
pub fn string_list(doc: &Value, path: &[&str]) -> Option<Vec<String>> {
    let items = array_at(doc, path)?;
    if items.is_empty() {
        return None;
    }
    Some(items.iter().map(display_string).collect())
}
