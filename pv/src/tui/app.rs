//! TUI application - keyboard handling
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::state::{AppState, InteractionMode};

/// TUI application
#[derive(Default)]
pub struct App {
    state: AppState,
}

impl App {
    pub fn new() -> Self {
        debug!("App::new: called");
        Self { state: AppState::new() }
    }

    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Ctrl+C quits from any mode
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        match self.state.mode {
            InteractionMode::Editing => self.handle_editing_key(key),
            InteractionMode::Browsing => self.handle_browsing_key(key),
        }
    }

    /// Key handling while typing the prompt
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_editing_key: called");
        match (key.code, key.modifiers) {
            (KeyCode::Enter, KeyModifiers::ALT) => {
                self.state.input.push('\n');
            }
            (KeyCode::Enter, _) => {
                if self.state.can_submit() {
                    let prompt = self.state.input.trim().to_string();
                    debug!(len = prompt.len(), "App::handle_editing_key: queueing submit");
                    self.state.pending_prompt = Some(prompt);
                } else {
                    debug!("App::handle_editing_key: submit gated, ignoring Enter");
                }
            }
            (KeyCode::Backspace, _) => {
                self.state.input.pop();
            }
            (KeyCode::Esc, _) | (KeyCode::Tab, _) => {
                debug!("App::handle_editing_key: switching to browsing");
                self.state.mode = InteractionMode::Browsing;
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.state.input.push(c);
            }
            _ => {}
        }
        false
    }

    /// Key handling while navigating the plan
    fn handle_browsing_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_browsing_key: called");
        match key.code {
            KeyCode::Char('q') => {
                debug!("App::handle_browsing_key: quit requested");
                self.state.should_quit = true;
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::Char('i') => {
                debug!("App::handle_browsing_key: switching to editing");
                self.state.mode = InteractionMode::Editing;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(plan) = self.state.plan.as_mut() {
                    plan.select_next();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(plan) = self.state.plan.as_mut() {
                    plan.select_prev();
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(plan) = self.state.plan.as_mut() {
                    plan.toggle_selected();
                }
            }
            KeyCode::Char('c') => {
                debug!("App::handle_browsing_key: clearing plan");
                self.state.clear_plan();
            }
            KeyCode::PageDown => {
                self.state.scroll = self.state.scroll.saturating_add(10);
            }
            KeyCode::PageUp => {
                self.state.scroll = self.state.scroll.saturating_sub(10);
            }
            _ => {}
        }
        false
    }
}
