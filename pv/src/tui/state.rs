//! TUI application state
//!
//! Pure data structures for the TUI. No rendering logic here. One mutable
//! slot holds the current plan; a monotonically increasing request id
//! keeps completions ordered by submission, not arrival.

use rand::seq::IndexedRandom;
use serde_json::Value;
use tracing::debug;

use crate::plan::{Section, SectionKind, resolve_sections};

/// Fun words for the loading indicator
pub const WORKING_WORDS: &[&str] = &[
    "Planning",
    "Drafting",
    "Sketching",
    "Outlining",
    "Structuring",
    "Scoping",
    "Blueprinting",
    "Deliberating",
];

/// Interaction mode (modal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Typing into the prompt input
    #[default]
    Editing,
    /// Navigating the rendered plan sections
    Browsing,
}

/// Request lifecycle phase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// A request is in flight; the word is the loading indicator label.
    Loading { word: &'static str },
}

/// One resolved plan with its per-section UI state.
///
/// Expand/collapse flags live here, not in the plan data: they are
/// scoped to the displayed document and reset wholesale when a new plan
/// replaces it.
#[derive(Debug)]
pub struct PlanView {
    /// The raw document as received, replaced wholesale per request.
    pub document: Value,
    pub sections: Vec<Section>,
    pub expanded: Vec<bool>,
    /// Cursor into `sections` for keyboard navigation.
    pub selected: usize,
}

impl PlanView {
    fn new(document: Value) -> Self {
        let sections = resolve_sections(&document);
        // Initial state: first section (Overview, or the sole raw-text
        // view) expanded, everything else collapsed.
        let expanded: Vec<bool> = sections.iter().enumerate().map(|(i, _)| i == 0).collect();
        debug!(sections = sections.len(), "PlanView::new: resolved");
        Self {
            document,
            sections,
            expanded,
            selected: 0,
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(flag) = self.expanded.get_mut(self.selected) {
            *flag = !*flag;
            debug!(selected = self.selected, expanded = *flag, "PlanView::toggle_selected");
        }
    }

    pub fn select_next(&mut self) {
        if !self.sections.is_empty() {
            self.selected = (self.selected + 1) % self.sections.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.sections.is_empty() {
            self.selected = (self.selected + self.sections.len() - 1) % self.sections.len();
        }
    }

    pub fn is_expanded(&self, kind: SectionKind) -> bool {
        self.sections
            .iter()
            .position(|s| s.kind == kind)
            .and_then(|i| self.expanded.get(i).copied())
            .unwrap_or(false)
    }
}

/// Application state for the TUI
pub struct AppState {
    /// Multi-line prompt input buffer
    pub input: String,
    /// Current plan, if any
    pub plan: Option<PlanView>,
    pub phase: Phase,
    /// Last request error, shown until the next submit or clear
    pub error: Option<String>,
    pub mode: InteractionMode,
    /// Content scroll offset within the sections pane
    pub scroll: u16,
    /// Prompt queued by key handling for the runner to dispatch
    pub pending_prompt: Option<String>,
    /// Monotonically increasing id of the latest issued request.
    /// Completions carrying any other id are stale and get dropped.
    latest_request: u64,
    /// Set when the user asks to quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        debug!("AppState::new: called");
        Self {
            input: String::new(),
            plan: None,
            phase: Phase::Idle,
            error: None,
            mode: InteractionMode::Editing,
            scroll: 0,
            pending_prompt: None,
            latest_request: 0,
            should_quit: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Submit gate: non-empty trimmed prompt and no request in flight.
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.is_loading()
    }

    /// Issue a new request id and enter the loading phase.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_request += 1;
        let word = WORKING_WORDS.choose(&mut rand::rng()).copied().unwrap_or("Planning");
        self.phase = Phase::Loading { word };
        self.error = None;
        debug!(request_id = self.latest_request, word, "begin_request: issued");
        self.latest_request
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Apply a completed request. Last-submit-wins: results for anything
    /// but the latest issued id are discarded. Returns whether the
    /// result was applied.
    pub fn accept_response(&mut self, request_id: u64, result: Result<Value, String>) -> bool {
        if request_id != self.latest_request {
            debug!(
                request_id,
                latest = self.latest_request,
                "accept_response: stale result discarded"
            );
            return false;
        }

        self.phase = Phase::Idle;
        match result {
            Ok(document) => {
                debug!(request_id, "accept_response: plan applied");
                self.plan = Some(PlanView::new(document));
                self.error = None;
                self.scroll = 0;
                self.mode = InteractionMode::Browsing;
            }
            Err(message) => {
                debug!(request_id, %message, "accept_response: error applied");
                self.error = Some(message);
            }
        }
        true
    }

    /// Discard the current plan. Bumps the request id so any in-flight
    /// response lands stale instead of resurrecting the cleared plan.
    pub fn clear_plan(&mut self) {
        debug!("clear_plan: called");
        self.plan = None;
        self.error = None;
        self.phase = Phase::Idle;
        self.scroll = 0;
        self.latest_request += 1;
        self.mode = InteractionMode::Editing;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_can_submit_gates_on_trimmed_input() {
        let mut state = AppState::new();
        assert!(!state.can_submit());
        state.input = "   \n ".to_string();
        assert!(!state.can_submit());
        state.input = "a real prompt".to_string();
        assert!(state.can_submit());
    }

    #[test]
    fn test_can_submit_gates_on_in_flight_request() {
        let mut state = AppState::new();
        state.input = "prompt".to_string();
        state.begin_request();
        assert!(!state.can_submit());
    }

    #[test]
    fn test_initial_expansion_overview_only() {
        let mut state = AppState::new();
        let id = state.begin_request();
        state.accept_response(id, Ok(json!({"project_name": "X"})));

        let plan = state.plan.as_ref().expect("plan applied");
        assert_eq!(plan.expanded, vec![true, false, false, false, false]);
        assert!(plan.is_expanded(SectionKind::Overview));
        assert!(!plan.is_expanded(SectionKind::FileBreakdown));
    }

    #[test]
    fn test_expansion_resets_on_new_plan() {
        let mut state = AppState::new();
        let id = state.begin_request();
        state.accept_response(id, Ok(json!({"project_name": "X"})));
        state.plan.as_mut().expect("plan").select_next();
        state.plan.as_mut().expect("plan").toggle_selected();

        let id = state.begin_request();
        state.accept_response(id, Ok(json!({"project_name": "Y"})));
        let plan = state.plan.as_ref().expect("plan");
        assert_eq!(plan.selected, 0);
        assert_eq!(plan.expanded, vec![true, false, false, false, false]);
    }

    #[test]
    fn test_last_submit_wins_by_submission_order() {
        let mut state = AppState::new();

        // Request A, then B before A's response arrives.
        let a = state.begin_request();
        let b = state.begin_request();

        // B's response first, then A's late response.
        assert!(state.accept_response(b, Ok(json!({"project_name": "B"}))));
        assert!(!state.accept_response(a, Ok(json!({"project_name": "A"}))));

        let plan = state.plan.as_ref().expect("plan");
        assert_eq!(
            plan.document.get("project_name").and_then(|v| v.as_str()),
            Some("B"),
            "displayed plan must reflect B, never A"
        );
    }

    #[test]
    fn test_response_after_clear_is_discarded() {
        let mut state = AppState::new();
        let id = state.begin_request();
        state.clear_plan();

        assert!(!state.accept_response(id, Ok(json!({"project_name": "stale"}))));
        assert!(state.plan.is_none());
    }

    #[test]
    fn test_error_result_returns_to_idle() {
        let mut state = AppState::new();
        let id = state.begin_request();
        state.accept_response(id, Err("boom".to_string()));

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.error.as_deref(), Some("boom"));
        state.input = "retry".to_string();
        assert!(state.can_submit(), "UI must return to a retryable state");
    }

    #[test]
    fn test_raw_text_plan_single_section() {
        let mut state = AppState::new();
        let id = state.begin_request();
        state.accept_response(id, Ok(json!({"format": "text", "raw_plan": "hello"})));

        let plan = state.plan.as_ref().expect("plan");
        assert_eq!(plan.sections.len(), 1);
        assert_eq!(plan.expanded, vec![true]);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = AppState::new();
        let id = state.begin_request();
        state.accept_response(id, Ok(json!({})));
        let plan = state.plan.as_mut().expect("plan");

        plan.select_prev();
        assert_eq!(plan.selected, 4);
        plan.select_next();
        assert_eq!(plan.selected, 0);
    }
}
