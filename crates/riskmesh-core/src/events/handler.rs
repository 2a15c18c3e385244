//! SimulationEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a simulation run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. Events are emitted from the
/// thread driving the run, between trial batches; `Send + Sync` lets one
/// handler be shared by simulators running on different threads.
pub trait SimulationEventHandler: Send + Sync {
    // ---- Planning ----
    fn on_plan_built(&self, _event: &PlanBuiltEvent) {}
    fn on_bad_event(&self, _event: &BadEventReportedEvent) {}

    // ---- Run lifecycle ----
    fn on_simulation_started(&self, _event: &SimulationStartedEvent) {}
    fn on_trials_progress(&self, _event: &TrialsProgressEvent) {}
    fn on_simulation_complete(&self, _event: &SimulationCompleteEvent) {}
    fn on_simulation_cancelled(&self, _event: &SimulationCancelledEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
