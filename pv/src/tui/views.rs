//! TUI views and rendering
//!
//! All rendering logic is contained here. Views draw the UI from
//! AppState but never modify it (scroll clamping aside).

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tracing::trace;

use crate::plan::{self, Dependencies, FileRecord, SafeContent, Section};

use super::state::{AppState, InteractionMode, Phase};

/// UI colors
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const LABEL: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const LOADING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!(?state.mode, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(5), // Prompt input
            Constraint::Min(0),    // Plan sections
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_input(state, frame, chunks[1]);
    render_plan(state, frame, chunks[2]);
    render_footer(state, frame, chunks[3]);
}

/// Header with app name and request status
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            "Planview",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
    ];

    match &state.phase {
        Phase::Loading { word } => {
            spans.push(Span::styled(
                format!("{word}..."),
                Style::default().fg(colors::LOADING),
            ));
        }
        Phase::Idle => {
            if state.plan.is_some() {
                spans.push(Span::styled("plan ready", Style::default().fg(colors::DIM)));
            } else {
                spans.push(Span::styled(
                    "describe a project and press Enter",
                    Style::default().fg(colors::DIM),
                ));
            }
        }
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// Prompt input box
fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_input: called");
    let editing = state.mode == InteractionMode::Editing;
    let border_style = if editing {
        Style::default().fg(colors::HEADER)
    } else {
        Style::default().fg(colors::DIM)
    };

    // Show the tail of the input when it overflows the box
    let inner_height = area.height.saturating_sub(2) as usize;
    let line_count = state.input.lines().count().max(1);
    let skip = line_count.saturating_sub(inner_height);
    let visible: String = state
        .input
        .lines()
        .skip(skip)
        .collect::<Vec<_>>()
        .join("\n");

    let mut text = visible;
    if editing && !state.is_loading() {
        text.push('█');
    }

    let input = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Project description "),
    );
    frame.render_widget(input, area);
}

/// Plan pane: error banner, or the resolved sections
fn render_plan(state: &mut AppState, frame: &mut Frame, area: Rect) {
    trace!("render_plan: called");
    let mut lines: Vec<Line> = Vec::new();

    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            format!(" ✗ {error}"),
            Style::default().fg(colors::ERROR),
        )));
        lines.push(Line::raw(""));
    }

    if let Some(plan) = &state.plan {
        for (i, section) in plan.sections.iter().enumerate() {
            let expanded = plan.expanded.get(i).copied().unwrap_or(false);
            let selected = state.mode == InteractionMode::Browsing && i == plan.selected;
            lines.push(section_header_line(section, expanded, selected));
            if expanded {
                if section.is_empty() {
                    lines.push(Line::from(Span::styled(
                        "   (empty)",
                        Style::default().fg(colors::DIM),
                    )));
                } else {
                    for block in &section.blocks {
                        lines.extend(block_lines(block));
                    }
                }
                lines.push(Line::raw(""));
            }
        }
    } else if state.error.is_none() {
        lines.push(Line::from(Span::styled(
            " No plan yet",
            Style::default().fg(colors::DIM),
        )));
    }

    // Clamp scroll so the pane cannot run past the content
    let inner_height = area.height.saturating_sub(2);
    let max_scroll = (lines.len() as u16).saturating_sub(inner_height);
    if state.scroll > max_scroll {
        state.scroll = max_scroll;
    }

    let pane = Paragraph::new(lines)
        .scroll((state.scroll, 0))
        .block(Block::default().borders(Borders::ALL).title(" Plan "));
    frame.render_widget(pane, area);
}

fn section_header_line(section: &Section, expanded: bool, selected: bool) -> Line<'static> {
    let marker = if expanded { "▾" } else { "▸" };
    let mut style = Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD);
    if selected {
        style = style.bg(colors::SELECTED_BG);
    }
    let mut spans = vec![Span::styled(format!(" {marker} {}", section.title), style)];
    if section.is_empty() {
        spans.push(Span::styled(" (empty)", Style::default().fg(colors::DIM)));
    }
    Line::from(spans)
}

/// Render one block as indented lines
fn block_lines(block: &plan::Block) -> Vec<Line<'static>> {
    trace!("block_lines: called");
    match block {
        plan::Block::Labeled { label, content } => labeled_lines(label, content),
        plan::Block::Bullets { label, items } => {
            let mut lines = vec![label_line(label)];
            for item in items {
                lines.push(Line::raw(format!("     • {item}")));
            }
            lines
        }
        plan::Block::Numbered { label, items } => {
            let mut lines = vec![label_line(label)];
            for (i, item) in items.iter().enumerate() {
                lines.push(Line::raw(format!("     {}. {item}", i + 1)));
            }
            lines
        }
        plan::Block::Preformatted { label, text } => {
            let mut lines = Vec::new();
            if let Some(label) = label {
                lines.push(label_line(label));
            }
            for row in text.lines() {
                lines.push(Line::raw(format!("   {row}")));
            }
            lines
        }
        plan::Block::Directories(dirs) => {
            let mut lines = vec![label_line("Directories")];
            for dir in dirs {
                let line = match &dir.purpose {
                    Some(purpose) => format!("     {}/ - {purpose}", dir.name),
                    None => format!("     {}/", dir.name),
                };
                lines.push(Line::raw(line));
            }
            lines
        }
        plan::Block::Files(files) => {
            let mut lines = vec![label_line("Files")];
            for file in files {
                let mut spans = vec![Span::raw(format!("     {}", file.path))];
                if file.entry_point {
                    spans.push(Span::styled(
                        " [entry point]",
                        Style::default().fg(colors::LOADING),
                    ));
                }
                if let Some(purpose) = &file.purpose {
                    spans.push(Span::styled(
                        format!(" - {purpose}"),
                        Style::default().fg(colors::DIM),
                    ));
                }
                lines.push(Line::from(spans));
            }
            lines
        }
        plan::Block::File(record) => file_record_lines(record),
        plan::Block::Placeholder(text) => vec![Line::from(Span::styled(
            format!("   {text}"),
            Style::default().fg(colors::DIM),
        ))],
    }
}

fn label_line(label: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("   {label}:"),
        Style::default().fg(colors::LABEL),
    ))
}

fn labeled_lines(label: &str, content: &SafeContent) -> Vec<Line<'static>> {
    match content {
        SafeContent::Text(text) => {
            let mut lines = vec![label_line(label)];
            for row in text.lines() {
                lines.push(Line::raw(format!("     {row}")));
            }
            lines
        }
        SafeContent::KeyedFacts(facts) => {
            let mut lines = vec![label_line(label)];
            for fact in facts {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("     {}: ", fact.label),
                        Style::default().fg(colors::LABEL),
                    ),
                    Span::raw(fact.value.clone()),
                ]));
            }
            lines
        }
    }
}

fn file_record_lines(record: &FileRecord) -> Vec<Line<'static>> {
    let path = record.file_path.as_deref().unwrap_or("(unnamed file)");
    let mut lines = vec![Line::from(Span::styled(
        format!("   {path}"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    let fields: [(&str, &Option<SafeContent>); 3] = [
        ("Purpose", &record.purpose),
        ("Functionality", &record.functionality),
        ("Interactions", &record.interactions),
    ];
    for (label, content) in fields {
        if let Some(content) = content {
            for line in labeled_lines(label, content) {
                lines.push(indent_line(line));
            }
        }
    }

    if !record.components.is_empty() {
        lines.push(indent_line(label_line("Components")));
        for item in &record.components {
            lines.push(Line::raw(format!("       • {item}")));
        }
    }

    match &record.dependencies {
        Some(Dependencies::List(items)) => {
            lines.push(indent_line(label_line("Dependencies")));
            for item in items {
                lines.push(Line::raw(format!("       • {item}")));
            }
        }
        Some(Dependencies::Inline(text)) => {
            for line in labeled_lines("Dependencies", &SafeContent::Text(text.clone())) {
                lines.push(indent_line(line));
            }
        }
        None => {}
    }

    lines
}

fn indent_line(line: Line<'static>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    spans.extend(line.spans);
    Line::from(spans)
}

/// Footer with context-sensitive keybinds
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let binds: &[(&str, &str)] = match state.mode {
        InteractionMode::Editing => &[
            ("Enter", "submit"),
            ("Alt+Enter", "newline"),
            ("Esc/Tab", "browse"),
            ("Ctrl+C", "quit"),
        ],
        InteractionMode::Browsing => &[
            ("j/k", "navigate"),
            ("Space", "expand/collapse"),
            ("c", "clear"),
            ("Esc/Tab", "edit"),
            ("q", "quit"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in binds.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
        }
        spans.push(Span::styled(format!("<{key}>"), Style::default().fg(colors::KEYBIND)));
        spans.push(Span::raw(format!(" {action}")));
    }

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
