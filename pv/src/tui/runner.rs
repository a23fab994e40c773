//! TUI Runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Drawing frames and dispatching terminal events to App
//! - Launching plan requests on a background task
//! - Routing request completions back into state, stale ones dropped

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::PlanService;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;

/// Completion of a background plan request
#[derive(Debug)]
struct RequestOutcome {
    request_id: u64,
    result: Result<Value, String>,
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    service: Arc<dyn PlanService>,
    event_handler: EventHandler,
    outcome_rx: Option<mpsc::UnboundedReceiver<RequestOutcome>>,
    request_task: Option<JoinHandle<()>>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, service: Arc<dyn PlanService>) -> Self {
        debug!("TuiRunner::new: called");
        Self {
            app: App::new(),
            terminal,
            service,
            event_handler: EventHandler::new(Duration::from_millis(100)),
            outcome_rx: None,
            request_task: None,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.dispatch_pending_request();

            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            // Wait for either a terminal event or a request completion
            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {}
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                debug!("TuiRunner::run: key handler requested exit");
                                break;
                            }
                        }
                        Event::Resize(w, h) => {
                            debug!(w, h, "TuiRunner::run: resize");
                        }
                    }
                }
                Some(outcome) = async {
                    if let Some(rx) = &mut self.outcome_rx {
                        rx.recv().await
                    } else {
                        std::future::pending::<Option<RequestOutcome>>().await
                    }
                } => {
                    self.handle_outcome(outcome);
                }
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        if let Some(task) = self.request_task.take() {
            debug!("TuiRunner::run: aborting in-flight request task");
            task.abort();
        }

        debug!("TuiRunner::run: exiting");
        Ok(())
    }

    /// Launch a background request for a prompt queued by key handling
    fn dispatch_pending_request(&mut self) {
        let Some(prompt) = self.app.state_mut().pending_prompt.take() else {
            return;
        };

        let request_id = self.app.state_mut().begin_request();
        debug!(request_id, "TuiRunner::dispatch_pending_request: launching");

        let (tx, rx) = mpsc::unbounded_channel();
        self.outcome_rx = Some(rx);

        let service = Arc::clone(&self.service);
        self.request_task = Some(tokio::spawn(async move {
            let result = service
                .request_plan(&prompt)
                .await
                .map_err(|e| e.to_string());
            if tx.send(RequestOutcome { request_id, result }).is_err() {
                warn!(request_id, "request outcome receiver dropped");
            }
        }));
    }

    /// Apply a completed request; stale ids are discarded by state
    fn handle_outcome(&mut self, outcome: RequestOutcome) {
        debug!(outcome.request_id, "TuiRunner::handle_outcome: called");
        let applied = self
            .app
            .state_mut()
            .accept_response(outcome.request_id, outcome.result);
        if !applied {
            debug!(outcome.request_id, "TuiRunner::handle_outcome: stale, ignored");
        }
    }
}
