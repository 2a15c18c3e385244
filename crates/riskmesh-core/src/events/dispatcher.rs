//! EventDispatcher: synchronous event dispatch, free when empty.

use std::sync::Arc;

use super::handler::SimulationEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn SimulationEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn SimulationEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn SimulationEventHandler)>(&self, f: F) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!(handler = index, "event handler panicked");
            }
        }
    }

    // ---- Planning ----
    pub fn emit_plan_built(&self, event: &PlanBuiltEvent) {
        self.emit(|h| h.on_plan_built(event));
    }

    pub fn emit_bad_event(&self, event: &BadEventReportedEvent) {
        self.emit(|h| h.on_bad_event(event));
    }

    // ---- Run lifecycle ----
    pub fn emit_simulation_started(&self, event: &SimulationStartedEvent) {
        self.emit(|h| h.on_simulation_started(event));
    }

    pub fn emit_trials_progress(&self, event: &TrialsProgressEvent) {
        self.emit(|h| h.on_trials_progress(event));
    }

    pub fn emit_simulation_complete(&self, event: &SimulationCompleteEvent) {
        self.emit(|h| h.on_simulation_complete(event));
    }

    pub fn emit_simulation_cancelled(&self, event: &SimulationCancelledEvent) {
        self.emit(|h| h.on_simulation_cancelled(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
