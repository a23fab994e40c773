//! Section resolution
//!
//! Maps an arbitrary plan document onto the fixed set of display
//! sections. Resolution is pure and total: no value shape makes it fail,
//! and anything missing or malformed degrades to empty content. The
//! upstream generator's output shape is not contractually fixed, so
//! absence is never an error here.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::breakdown::{self, Breakdown, FileRecord};
use super::content::SafeContent;
use super::probe;

/// Stable identity of a section, independent of its display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Raw-text fallback for documents that are not structured plans.
    RawPlan,
    Overview,
    TechnicalRequirements,
    Structure,
    FileBreakdown,
    ImplementationStrategy,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::RawPlan => "Generated Project Plan",
            Self::Overview => "Project Overview",
            Self::TechnicalRequirements => "Technical Requirements",
            Self::Structure => "Project Structure",
            Self::FileBreakdown => "File Breakdown",
            Self::ImplementationStrategy => "Implementation Strategy",
        }
    }
}

/// A directory entry from `project_structure.directories`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub purpose: Option<String>,
}

/// A file entry from `project_structure.files`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub purpose: Option<String>,
    pub entry_point: bool,
}

/// One renderable unit inside a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// A labeled value that may be a string or keyed facts.
    Labeled { label: String, content: SafeContent },
    /// A labeled bulleted list.
    Bullets { label: String, items: Vec<String> },
    /// A labeled numbered list. Numbering always starts at 1.
    Numbered { label: String, items: Vec<String> },
    /// Preformatted text rendered as-is (folder trees, raw plans).
    Preformatted { label: Option<String>, text: String },
    /// Directory listing from the structure section.
    Directories(Vec<DirEntry>),
    /// File listing from the structure section.
    Files(Vec<FileEntry>),
    /// One normalized file-breakdown record.
    File(FileRecord),
    /// Informational marker, e.g. "No file breakdown available".
    Placeholder(String),
}

/// One resolved display section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

impl Section {
    fn new(kind: SectionKind, blocks: Vec<Block>) -> Self {
        Self {
            kind,
            title: kind.title(),
            blocks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Resolve a plan document into its display sections.
///
/// Raw-text documents short-circuit to a single [`SectionKind::RawPlan`]
/// section; everything else resolves to the five structured sections in
/// fixed order, empty ones included.
pub fn resolve_sections(doc: &Value) -> Vec<Section> {
    debug!("resolve_sections: called");
    if let Some(text) = raw_text_plan(doc) {
        debug!("resolve_sections: raw-text document, skipping structured sections");
        return vec![Section::new(
            SectionKind::RawPlan,
            vec![Block::Preformatted { label: None, text }],
        )];
    }

    vec![
        overview(doc),
        technical_requirements(doc),
        structure(doc),
        file_breakdown(doc),
        implementation_strategy(doc),
    ]
}

/// Detect the raw-text fallback: `format == "text"`, or the document is
/// itself a string. Uses `raw_plan` when present, else the stringified
/// document.
fn raw_text_plan(doc: &Value) -> Option<String> {
    if let Some(text) = doc.as_str() {
        return Some(text.to_string());
    }
    if probe::string_at(doc, &["format"]) != Some("text") {
        return None;
    }
    match probe::string_at(doc, &["raw_plan"]) {
        Some(raw) => Some(raw.to_string()),
        None => Some(serde_json::to_string_pretty(doc).unwrap_or_else(|_| doc.to_string())),
    }
}

fn overview(doc: &Value) -> Section {
    debug!("overview: resolving");
    let mut blocks = Vec::new();

    let fields: &[(&str, &[&[&str]])] = &[
        (
            "Project Name",
            &[&["project_name"], &["project_overview", "name"], &["project_overview", "project_name"]],
        ),
        (
            "Description",
            &[
                &["project_description"],
                &["project_overview", "description"],
                &["project_overview", "project_description"],
            ],
        ),
        (
            "Purpose",
            &[&["project_overview", "purpose"], &["project_overview", "main_functionality"]],
        ),
        (
            "Target Audience",
            &[&["target_audience"], &["project_overview", "target_audience"]],
        ),
    ];

    for (label, paths) in fields {
        if let Some(value) = probe::first_present(doc, paths) {
            blocks.push(Block::Labeled {
                label: (*label).to_string(),
                content: SafeContent::from_value(value),
            });
        }
    }

    Section::new(SectionKind::Overview, blocks)
}

fn technical_requirements(doc: &Value) -> Section {
    debug!("technical_requirements: resolving");
    let mut blocks = Vec::new();
    let base = "technical_requirements";

    if let Some(value) = probe::present(doc, &[base, "python_version"]) {
        blocks.push(labeled("Python Version", value));
    }

    if let Some(items) = probe::string_list(doc, &[base, "dependencies"]) {
        blocks.push(Block::Bullets {
            label: "Required Libraries".to_string(),
            items,
        });
    }

    if let Some(value) = probe::present(doc, &[base, "gui_framework"]) {
        blocks.push(labeled("GUI Framework", value));
    }

    if let Some(value) = probe::present(doc, &[base, "gui_framework_justification"]) {
        blocks.push(labeled("Framework Justification", value));
    }

    // "None" is the generator's way of spelling absence for these two.
    if let Some(value) = probe::present(doc, &[base, "database_requirements"])
        && value.as_str() != Some("None")
    {
        blocks.push(labeled("Database", value));
    }

    if let Some(value) = probe::present(doc, &[base, "external_apis"])
        && value.as_str() != Some("None")
        && let Some(items) = probe::string_list(doc, &[base, "external_apis"])
    {
        blocks.push(Block::Bullets {
            label: "External APIs".to_string(),
            items,
        });
    }

    Section::new(SectionKind::TechnicalRequirements, blocks)
}

fn structure(doc: &Value) -> Section {
    debug!("structure: resolving");
    let mut blocks = Vec::new();
    let base = "project_structure";

    if let Some(root) = probe::string_at(doc, &[base, "root_directory"]) {
        blocks.push(Block::Labeled {
            label: "Root Directory".to_string(),
            content: SafeContent::Text(root.to_string()),
        });
    }

    if let Some(items) = probe::array_at(doc, &[base, "directories"]) {
        let dirs: Vec<DirEntry> = items
            .iter()
            .map(|item| DirEntry {
                name: probe::string_at(item, &["name"]).unwrap_or_default().to_string(),
                purpose: probe::string_at(item, &["purpose"]).map(str::to_string),
            })
            .collect();
        if !dirs.is_empty() {
            blocks.push(Block::Directories(dirs));
        }
    }

    if let Some(items) = probe::array_at(doc, &[base, "files"]) {
        let files: Vec<FileEntry> = items
            .iter()
            .map(|item| FileEntry {
                path: probe::string_at(item, &["path"]).unwrap_or_default().to_string(),
                purpose: probe::string_at(item, &["purpose"]).map(str::to_string),
                entry_point: probe::get(item, &["entry_point"]).and_then(Value::as_bool).unwrap_or(false),
            })
            .collect();
        if !files.is_empty() {
            blocks.push(Block::Files(files));
        }
    }

    if let Some(tree) = probe::string_at(doc, &[base, "folders"]) {
        blocks.push(Block::Preformatted {
            label: Some("Folder Structure".to_string()),
            text: tree.to_string(),
        });
    }

    if let Some(description) = probe::string_at(doc, &[base, "description"]) {
        blocks.push(Block::Labeled {
            label: "Structure Description".to_string(),
            content: SafeContent::Text(description.to_string()),
        });
    }

    Section::new(SectionKind::Structure, blocks)
}

fn file_breakdown(doc: &Value) -> Section {
    debug!("file_breakdown: resolving");
    let value = probe::get(doc, &["file_breakdown"]);
    let blocks = match breakdown::normalize(value) {
        Breakdown::Absent => vec![],
        Breakdown::Preformatted(text) => vec![Block::Preformatted {
            label: Some("Project Files".to_string()),
            text,
        }],
        Breakdown::Records(records) if records.is_empty() => {
            vec![Block::Placeholder("No file breakdown available".to_string())]
        }
        Breakdown::Records(records) => records.into_iter().map(Block::File).collect(),
    };

    Section::new(SectionKind::FileBreakdown, blocks)
}

fn implementation_strategy(doc: &Value) -> Section {
    debug!("implementation_strategy: resolving");
    let mut blocks = Vec::new();
    let base = "implementation_strategy";

    // `phases` and `development_phases` are aliases for the same concept.
    // When both are present, both render: duplication over silent loss.
    if let Some(items) = probe::string_list(doc, &[base, "phases"]) {
        blocks.push(Block::Numbered {
            label: "Development Phases".to_string(),
            items,
        });
    }

    if let Some(items) = probe::string_list(doc, &[base, "development_phases"]) {
        blocks.push(Block::Numbered {
            label: "Development Phases".to_string(),
            items,
        });
    }

    if let Some(text) = probe::string_at(doc, &[base, "development_phases"]) {
        blocks.push(Block::Labeled {
            label: "Development Phases".to_string(),
            content: SafeContent::Text(text.to_string()),
        });
    }

    if let Some(value) = probe::present(doc, &[base, "test_file_requirements"]) {
        blocks.push(labeled("Test File Requirements", value));
    }

    if let Some(value) = probe::present(doc, &[base, "deployment_considerations"]) {
        blocks.push(labeled("Deployment Considerations", value));
    }

    if let Some(items) = probe::string_list(doc, &[base, "critical_components"]) {
        blocks.push(Block::Bullets {
            label: "Critical Components".to_string(),
            items,
        });
    }

    if let Some(value) = probe::present(doc, &[base, "testing_strategy"]) {
        blocks.push(labeled("Testing Strategy", value));
    }

    if let Some(value) = probe::present(doc, &[base, "deployment"]) {
        blocks.push(labeled("Deployment", value));
    }

    Section::new(SectionKind::ImplementationStrategy, blocks)
}

fn labeled(label: &str, value: &Value) -> Block {
    Block::Labeled {
        label: label.to_string(),
        content: SafeContent::from_value(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn section(sections: &[Section], kind: SectionKind) -> &Section {
        sections.iter().find(|s| s.kind == kind).expect("section present")
    }

    #[test]
    fn test_empty_object_yields_five_empty_sections() {
        let sections = resolve_sections(&json!({}));
        assert_eq!(sections.len(), 5);
        assert!(sections.iter().all(Section::is_empty));
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Overview,
                SectionKind::TechnicalRequirements,
                SectionKind::Structure,
                SectionKind::FileBreakdown,
                SectionKind::ImplementationStrategy,
            ]
        );
    }

    #[test]
    fn test_raw_text_format_short_circuits() {
        let sections = resolve_sections(&json!({"format": "text", "raw_plan": "hello"}));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::RawPlan);
        assert_eq!(
            sections[0].blocks,
            vec![Block::Preformatted {
                label: None,
                text: "hello".to_string()
            }]
        );
    }

    #[test]
    fn test_string_document_is_raw_text() {
        let sections = resolve_sections(&json!("just notes"));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::RawPlan);
        assert_eq!(
            sections[0].blocks,
            vec![Block::Preformatted {
                label: None,
                text: "just notes".to_string()
            }]
        );
    }

    #[test]
    fn test_raw_text_without_raw_plan_stringifies_document() {
        let doc = json!({"format": "text", "note": "x"});
        let sections = resolve_sections(&doc);
        assert_eq!(sections.len(), 1);
        let Block::Preformatted { text, .. } = &sections[0].blocks[0] else {
            panic!("expected preformatted block");
        };
        assert!(text.contains("\"note\""));
    }

    #[test]
    fn test_overview_probe_chain_outer_name_wins() {
        let doc = json!({
            "project_name": "Outer",
            "project_overview": {"name": "Inner", "description": "From overview"}
        });
        let sections = resolve_sections(&doc);
        let overview = section(&sections, SectionKind::Overview);
        assert_eq!(
            overview.blocks[0],
            Block::Labeled {
                label: "Project Name".to_string(),
                content: SafeContent::Text("Outer".to_string())
            }
        );
        // Name resolving from the outer field does not block description
        // resolving from the nested object.
        assert_eq!(
            overview.blocks[1],
            Block::Labeled {
                label: "Description".to_string(),
                content: SafeContent::Text("From overview".to_string())
            }
        );
    }

    #[test]
    fn test_database_none_sentinel_is_suppressed() {
        let doc = json!({"technical_requirements": {"database_requirements": "None"}});
        let sections = resolve_sections(&doc);
        assert!(section(&sections, SectionKind::TechnicalRequirements).is_empty());

        let doc = json!({"technical_requirements": {"database_requirements": "SQLite"}});
        let sections = resolve_sections(&doc);
        let tech = section(&sections, SectionKind::TechnicalRequirements);
        assert_eq!(
            tech.blocks,
            vec![Block::Labeled {
                label: "Database".to_string(),
                content: SafeContent::Text("SQLite".to_string())
            }]
        );
    }

    #[test]
    fn test_external_apis_none_sentinel_and_non_array() {
        let none = json!({"technical_requirements": {"external_apis": "None"}});
        assert!(section(&resolve_sections(&none), SectionKind::TechnicalRequirements).is_empty());

        let scalar = json!({"technical_requirements": {"external_apis": "just one"}});
        assert!(section(&resolve_sections(&scalar), SectionKind::TechnicalRequirements).is_empty());

        let listed = json!({"technical_requirements": {"external_apis": ["OpenWeather"]}});
        let sections = resolve_sections(&listed);
        let tech = section(&sections, SectionKind::TechnicalRequirements);
        assert_eq!(
            tech.blocks,
            vec![Block::Bullets {
                label: "External APIs".to_string(),
                items: vec!["OpenWeather".to_string()]
            }]
        );
    }

    #[test]
    fn test_structure_non_array_lists_are_absent() {
        let doc = json!({"project_structure": {
            "directories": "src and tests",
            "files": {"path": "main.py"},
            "root_directory": "app"
        }});
        let sections = resolve_sections(&doc);
        let structure = section(&sections, SectionKind::Structure);
        assert_eq!(structure.blocks.len(), 1);
        assert!(matches!(&structure.blocks[0], Block::Labeled { label, .. } if label == "Root Directory"));
    }

    #[test]
    fn test_file_breakdown_legacy_map_resolves_records() {
        let doc = json!({"file_breakdown": {
            "a.py": "does X",
            "b.py": {"purpose": "does Y", "dependencies": ["os"]}
        }});
        let sections = resolve_sections(&doc);
        let files = section(&sections, SectionKind::FileBreakdown);
        assert_eq!(files.blocks.len(), 2);
        let Block::File(first) = &files.blocks[0] else {
            panic!("expected file record");
        };
        assert_eq!(first.file_path.as_deref(), Some("a.py"));
    }

    #[test]
    fn test_file_breakdown_empty_records_show_placeholder() {
        let doc = json!({"file_breakdown": []});
        let sections = resolve_sections(&doc);
        let files = section(&sections, SectionKind::FileBreakdown);
        assert_eq!(
            files.blocks,
            vec![Block::Placeholder("No file breakdown available".to_string())]
        );
    }

    #[test]
    fn test_file_breakdown_scalar_shows_placeholder() {
        let doc = json!({"file_breakdown": 42});
        let sections = resolve_sections(&doc);
        let files = section(&sections, SectionKind::FileBreakdown);
        assert_eq!(
            files.blocks,
            vec![Block::Placeholder("No file breakdown available".to_string())]
        );

        // Null and missing still render nothing at all
        let null_doc = json!({"file_breakdown": null});
        assert!(section(&resolve_sections(&null_doc), SectionKind::FileBreakdown).is_empty());
        assert!(section(&resolve_sections(&json!({})), SectionKind::FileBreakdown).is_empty());
    }

    #[test]
    fn test_both_phase_aliases_render_independently() {
        let doc = json!({"implementation_strategy": {
            "phases": ["x"],
            "development_phases": ["y"]
        }});
        let sections = resolve_sections(&doc);
        let strategy = section(&sections, SectionKind::ImplementationStrategy);
        assert_eq!(
            strategy.blocks,
            vec![
                Block::Numbered {
                    label: "Development Phases".to_string(),
                    items: vec!["x".to_string()]
                },
                Block::Numbered {
                    label: "Development Phases".to_string(),
                    items: vec!["y".to_string()]
                },
            ]
        );
    }

    #[test]
    fn test_development_phases_string_shape() {
        let doc = json!({"implementation_strategy": {"development_phases": "one big phase"}});
        let sections = resolve_sections(&doc);
        let strategy = section(&sections, SectionKind::ImplementationStrategy);
        assert_eq!(
            strategy.blocks,
            vec![Block::Labeled {
                label: "Development Phases".to_string(),
                content: SafeContent::Text("one big phase".to_string())
            }]
        );
    }

    #[test]
    fn test_fully_populated_plan_has_five_non_empty_sections() {
        let sections = resolve_sections(&crate::demo::sample_plan());
        assert_eq!(sections.len(), 5);
        assert!(sections.iter().all(|s| !s.is_empty()), "all sections should have content");
    }

    fn arb_json() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            "\\PC*".prop_map(serde_json::Value::from),
        ];
        leaf.prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::from),
                prop::collection::btree_map("\\PC*", inner, 0..6)
                    .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        // Resolution must be total and pure: any document resolves
        // without panicking, and resolving twice gives identical output.
        #[test]
        fn test_resolver_is_total_and_idempotent(doc in arb_json()) {
            let first = resolve_sections(&doc);
            let second = resolve_sections(&doc);
            prop_assert_eq!(first, second);
        }
    }
}
