//! File breakdown normalization
//!
//! `file_breakdown` is the most shape-unstable field the planning service
//! emits. Current backends send a single preformatted string; older ones
//! sent an array of per-file records, a wrapper object with a `files`
//! array, or a map keyed by file path. Normalization runs a pipeline of
//! shape detectors in fixed priority order; the first one that produces a
//! result wins.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::content::SafeContent;
use super::probe::display_string;

/// Per-file dependencies: a list when the generator sent an array, inline
/// text when it sent a scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependencies {
    List(Vec<String>),
    Inline(String),
}

/// One normalized file record.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FileRecord {
    pub file_path: Option<String>,
    pub purpose: Option<SafeContent>,
    pub functionality: Option<SafeContent>,
    pub components: Vec<String>,
    pub dependencies: Option<Dependencies>,
    pub interactions: Option<SafeContent>,
}

impl FileRecord {
    /// Build a record from one element of an array-shaped breakdown.
    ///
    /// Non-object elements produce an empty record; the renderer falls
    /// back to a positional label for those.
    fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            file_path: non_empty(map.get("file_path")).or_else(|| non_empty(map.get("path"))),
            purpose: safe_field(map.get("purpose")),
            functionality: safe_field(map.get("functionality")),
            components: map
                .get("components")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(display_string).collect())
                .unwrap_or_default(),
            dependencies: map.get("dependencies").and_then(dependencies_from),
            interactions: safe_field(map.get("interactions")),
        }
    }
}

/// Normalized shape of the whole breakdown field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Breakdown {
    /// Field absent, null, or an empty string: the section renders
    /// nothing.
    Absent,
    /// Current format: one preformatted text block.
    Preformatted(String),
    /// Legacy formats, normalized to an ordered record sequence. May be
    /// empty; the section renderer shows a placeholder in that case.
    Records(Vec<FileRecord>),
}

/// Normalize a `file_breakdown` value through the detector pipeline.
pub fn normalize(value: Option<&Value>) -> Breakdown {
    debug!(present = value.is_some(), "breakdown::normalize: called");
    let Some(value) = value else {
        return Breakdown::Absent;
    };

    // String format short-circuits the record detectors entirely.
    if let Some(text) = value.as_str() {
        if text.is_empty() {
            debug!("breakdown::normalize: empty string, treating as absent");
            return Breakdown::Absent;
        }
        debug!("breakdown::normalize: preformatted string format");
        return Breakdown::Preformatted(text.to_string());
    }

    let detectors: &[fn(&Value) -> Option<Vec<FileRecord>>] = &[from_array, from_files_key, from_map];
    for detect in detectors {
        if let Some(records) = detect(value) {
            debug!(count = records.len(), "breakdown::normalize: detector produced records");
            return Breakdown::Records(records);
        }
    }

    if value.is_null() {
        debug!("breakdown::normalize: null, treating as absent");
        return Breakdown::Absent;
    }

    // A present scalar that matched no detector (number, bool) still
    // counts as a breakdown attempt: empty records, so the section shows
    // its placeholder instead of rendering nothing.
    debug!("breakdown::normalize: unrecognized scalar, empty records");
    Breakdown::Records(vec![])
}

/// Detector: an ordered sequence of file records as-is.
fn from_array(value: &Value) -> Option<Vec<FileRecord>> {
    let items = value.as_array()?;
    Some(items.iter().map(FileRecord::from_value).collect())
}

/// Detector: a wrapper object whose `files` key holds the sequence.
fn from_files_key(value: &Value) -> Option<Vec<FileRecord>> {
    let nested = value.as_object()?.get("files")?.as_array()?;
    Some(nested.iter().map(FileRecord::from_value).collect())
}

/// Detector: a map from file path to record or scalar (legacy shape).
///
/// Object values get the path merged in as `file_path` alongside their
/// own fields; scalar values become the record's `purpose`.
fn from_map(value: &Value) -> Option<Vec<FileRecord>> {
    let map = value.as_object()?;
    let records = map
        .iter()
        .map(|(path, info)| {
            if info.is_object() {
                let mut record = FileRecord::from_value(info);
                record.file_path.get_or_insert_with(|| path.clone());
                record
            } else {
                FileRecord {
                    file_path: Some(path.clone()),
                    purpose: Some(SafeContent::from_value(info)),
                    ..Default::default()
                }
            }
        })
        .collect();
    Some(records)
}

fn non_empty(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_string)
}

fn safe_field(value: Option<&Value>) -> Option<SafeContent> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        present => Some(SafeContent::from_value(present)),
    }
}

fn dependencies_from(value: &Value) -> Option<Dependencies> {
    match value {
        Value::Array(items) => Some(Dependencies::List(items.iter().map(display_string).collect())),
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        scalar => Some(Dependencies::Inline(display_string(scalar))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_format_is_preformatted() {
        let value = json!("main.py - entry point\nutils.py - helpers");
        assert_eq!(
            normalize(Some(&value)),
            Breakdown::Preformatted("main.py - entry point\nutils.py - helpers".to_string())
        );
    }

    #[test]
    fn test_missing_field_is_absent() {
        assert_eq!(normalize(None), Breakdown::Absent);
        assert_eq!(normalize(Some(&json!(""))), Breakdown::Absent);
    }

    #[test]
    fn test_array_format_keeps_order() {
        let value = json!([
            {"path": "main.py", "purpose": "entry point"},
            {"file_path": "db.py", "purpose": "storage"}
        ]);
        let Breakdown::Records(records) = normalize(Some(&value)) else {
            panic!("expected records");
        };
        assert_eq!(records[0].file_path.as_deref(), Some("main.py"));
        assert_eq!(records[1].file_path.as_deref(), Some("db.py"));
    }

    #[test]
    fn test_nested_files_key_wins_over_map_pairing() {
        let value = json!({
            "files": [{"path": "app.py", "purpose": "entry"}],
            "other": "noise"
        });
        let Breakdown::Records(records) = normalize(Some(&value)) else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_path.as_deref(), Some("app.py"));
    }

    #[test]
    fn test_legacy_map_pairs_paths_with_records() {
        let value = json!({
            "a.py": "does X",
            "b.py": {"purpose": "does Y", "dependencies": ["os"]}
        });
        let Breakdown::Records(records) = normalize(Some(&value)) else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].file_path.as_deref(), Some("a.py"));
        assert_eq!(records[0].purpose, Some(SafeContent::Text("does X".to_string())));
        assert!(records[0].dependencies.is_none());

        assert_eq!(records[1].file_path.as_deref(), Some("b.py"));
        assert_eq!(records[1].purpose, Some(SafeContent::Text("does Y".to_string())));
        assert_eq!(
            records[1].dependencies,
            Some(Dependencies::List(vec!["os".to_string()]))
        );
    }

    #[test]
    fn test_map_value_own_file_path_is_kept() {
        let value = json!({"listed.py": {"file_path": "actual.py", "purpose": "p"}});
        let Breakdown::Records(records) = normalize(Some(&value)) else {
            panic!("expected records");
        };
        assert_eq!(records[0].file_path.as_deref(), Some("actual.py"));
    }

    #[test]
    fn test_scalar_dependencies_render_inline() {
        let value = json!([{"path": "x.py", "dependencies": "requests only"}]);
        let Breakdown::Records(records) = normalize(Some(&value)) else {
            panic!("expected records");
        };
        assert_eq!(
            records[0].dependencies,
            Some(Dependencies::Inline("requests only".to_string()))
        );
    }

    #[test]
    fn test_empty_map_yields_empty_records() {
        assert_eq!(normalize(Some(&json!({}))), Breakdown::Records(vec![]));
    }

    #[test]
    fn test_non_object_elements_become_blank_records() {
        let value = json!(["just a string", 42]);
        let Breakdown::Records(records) = normalize(Some(&value)) else {
            panic!("expected records");
        };
        assert_eq!(records.len(), 2);
        assert!(records[0].file_path.is_none());
        assert!(records[0].purpose.is_none());
    }

    #[test]
    fn test_unrecognized_scalar_yields_empty_records() {
        // Present but unusable values still reach the placeholder path
        assert_eq!(normalize(Some(&json!(42))), Breakdown::Records(vec![]));
        assert_eq!(normalize(Some(&json!(true))), Breakdown::Records(vec![]));
    }

    #[test]
    fn test_null_is_absent() {
        assert_eq!(normalize(Some(&json!(null))), Breakdown::Absent);
    }
}
