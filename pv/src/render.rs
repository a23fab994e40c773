//! Plain-text rendering of resolved sections
//!
//! Batch-mode output for `pv plan` and `pv demo`. The TUI has its own
//! rendering in [`crate::tui::views`]; this one writes to stdout.

use eyre::Result;
use tracing::debug;

use crate::plan::{Block, Dependencies, FileRecord, SafeContent, Section};

/// Render sections as indented plain text.
pub fn render_text(sections: &[Section]) -> String {
    debug!(count = sections.len(), "render_text: called");
    let mut out = String::new();

    for section in sections {
        out.push_str(section.title);
        out.push('\n');
        out.push_str(&"-".repeat(section.title.len()));
        out.push('\n');

        if section.is_empty() {
            out.push_str("  (empty)\n\n");
            continue;
        }

        for (index, block) in section.blocks.iter().enumerate() {
            render_block(&mut out, block, index);
        }
        out.push('\n');
    }

    out
}

/// Render sections as pretty-printed JSON.
pub fn render_json(sections: &[Section]) -> Result<String> {
    debug!(count = sections.len(), "render_json: called");
    Ok(serde_json::to_string_pretty(sections)?)
}

fn render_block(out: &mut String, block: &Block, index: usize) {
    match block {
        Block::Labeled { label, content } => {
            render_content(out, label, content);
        }
        Block::Bullets { label, items } => {
            out.push_str(&format!("  {}:\n", label));
            for item in items {
                out.push_str(&format!("    - {}\n", item));
            }
        }
        Block::Numbered { label, items } => {
            out.push_str(&format!("  {}:\n", label));
            for (n, item) in items.iter().enumerate() {
                out.push_str(&format!("    {}. {}\n", n + 1, item));
            }
        }
        Block::Preformatted { label, text } => {
            if let Some(label) = label {
                out.push_str(&format!("  {}:\n", label));
            }
            for line in text.lines() {
                out.push_str(&format!("    {}\n", line));
            }
        }
        Block::Directories(dirs) => {
            out.push_str("  Directories:\n");
            for dir in dirs {
                match &dir.purpose {
                    Some(purpose) => out.push_str(&format!("    {}/ - {}\n", dir.name, purpose)),
                    None => out.push_str(&format!("    {}/\n", dir.name)),
                }
            }
        }
        Block::Files(files) => {
            out.push_str("  Key Files:\n");
            for file in files {
                let marker = if file.entry_point { " (entry point)" } else { "" };
                match &file.purpose {
                    Some(purpose) => out.push_str(&format!("    {}{} - {}\n", file.path, marker, purpose)),
                    None => out.push_str(&format!("    {}{}\n", file.path, marker)),
                }
            }
        }
        Block::File(record) => render_file_record(out, record, index),
        Block::Placeholder(text) => {
            out.push_str(&format!("  {}\n", text));
        }
    }
}

fn render_content(out: &mut String, label: &str, content: &SafeContent) {
    match content {
        SafeContent::Text(text) => {
            out.push_str(&format!("  {}: {}\n", label, text));
        }
        SafeContent::KeyedFacts(facts) => {
            out.push_str(&format!("  {}:\n", label));
            for fact in facts {
                out.push_str(&format!("    {}: {}\n", fact.label, fact.value));
            }
        }
    }
}

fn render_file_record(out: &mut String, record: &FileRecord, index: usize) {
    let path = record
        .file_path
        .clone()
        .unwrap_or_else(|| format!("File {}", index + 1));
    out.push_str(&format!("  {}\n", path));

    if let Some(purpose) = &record.purpose {
        render_nested(out, "Purpose", purpose);
    }
    if let Some(functionality) = &record.functionality {
        render_nested(out, "Functionality", functionality);
    }
    if !record.components.is_empty() {
        out.push_str("    Key Components:\n");
        for component in &record.components {
            out.push_str(&format!("      - {}\n", component));
        }
    }
    match &record.dependencies {
        Some(Dependencies::List(deps)) => {
            out.push_str("    Dependencies:\n");
            for dep in deps {
                out.push_str(&format!("      - {}\n", dep));
            }
        }
        Some(Dependencies::Inline(text)) => {
            out.push_str(&format!("    Dependencies: {}\n", text));
        }
        None => {}
    }
    if let Some(interactions) = &record.interactions {
        render_nested(out, "Interactions", interactions);
    }
}

fn render_nested(out: &mut String, label: &str, content: &SafeContent) {
    match content {
        SafeContent::Text(text) => {
            out.push_str(&format!("    {}: {}\n", label, text));
        }
        SafeContent::KeyedFacts(facts) => {
            out.push_str(&format!("    {}:\n", label));
            for fact in facts {
                out.push_str(&format!("      {}: {}\n", fact.label, fact.value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::sample_plan;
    use crate::plan::resolve_sections;

    #[test]
    fn test_text_render_includes_all_titles() {
        let sections = resolve_sections(&sample_plan());
        let text = render_text(&sections);
        for title in [
            "Project Overview",
            "Technical Requirements",
            "Project Structure",
            "File Breakdown",
            "Implementation Strategy",
        ] {
            assert!(text.contains(title), "missing title: {}", title);
        }
    }

    #[test]
    fn test_text_render_marks_empty_sections() {
        let sections = resolve_sections(&serde_json::json!({}));
        let text = render_text(&sections);
        assert_eq!(text.matches("(empty)").count(), 5);
    }

    #[test]
    fn test_numbered_lists_start_at_one() {
        let doc = serde_json::json!({"implementation_strategy": {
            "phases": ["alpha"],
            "development_phases": ["beta"]
        }});
        let text = render_text(&resolve_sections(&doc));
        assert_eq!(text.matches("1. ").count(), 2, "both lists number from 1");
    }

    #[test]
    fn test_json_render_round_trips() {
        let sections = resolve_sections(&sample_plan());
        let json = render_json(&sections).expect("render should succeed");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(parsed.as_array().map(|a| a.len()), Some(5));
    }

    #[test]
    fn test_file_record_positional_fallback() {
        let doc = serde_json::json!({"file_breakdown": ["not-a-record"]});
        let text = render_text(&resolve_sections(&doc));
        assert!(text.contains("File 1"));
    }
}
