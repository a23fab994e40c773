//! Tolerant content rendering for fields that may be strings or objects
//!
//! Several plan fields arrive as either a plain string or a nested object
//! depending on what the generator felt like emitting. Rather than branch
//! ad hoc at every render site, the two cases are a closed variant with
//! one rendering rule each.

use serde::Serialize;
use serde_json::Value;

use super::probe::display_string;

/// A single `key: value` line extracted from an object-shaped field.
///
/// The label has underscores replaced by spaces; the value is the string
/// verbatim, or compact JSON when the value was not a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

/// Content that renders safely no matter which shape the generator chose.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafeContent {
    /// Plain string, rendered verbatim.
    Text(String),
    /// Object rendered as an ordered list of `key: value` lines.
    KeyedFacts(Vec<Fact>),
}

impl SafeContent {
    /// Build from an arbitrary JSON value. Total: every value shape maps
    /// to one of the two variants.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s.clone()),
            Value::Object(map) => Self::KeyedFacts(
                map.iter()
                    .map(|(key, val)| Fact {
                        label: key.replace('_', " "),
                        value: display_string(val),
                    })
                    .collect(),
            ),
            other => Self::Text(display_string(other)),
        }
    }
}
