//! Terminal UI
//!
//! Interactive client: type a project description, submit it to the
//! planning service, and browse the resolved plan sections with
//! expand/collapse. Layout: app (key handling), state (pure data),
//! views (rendering), events (input pump), runner (main loop).

use std::sync::Arc;

use eyre::Result;
use tracing::debug;

use crate::client::PlanService;

pub mod app;
pub mod events;
pub mod runner;
pub mod state;
pub mod views;

/// Terminal handle used by the runner
pub type Tui = ratatui::DefaultTerminal;

/// Run the interactive TUI until the user quits.
///
/// Takes over the terminal; restores it on exit, including the error
/// path.
pub async fn run(service: Arc<dyn PlanService>) -> Result<()> {
    debug!("tui::run: called");
    let terminal = ratatui::init();
    let result = runner::TuiRunner::new(terminal, service).run().await;
    ratatui::restore();
    debug!("tui::run: terminal restored");
    result
}
