//! Event payload types.

use crate::types::EventId;

/// Payload for `on_plan_built`.
#[derive(Debug, Clone)]
pub struct PlanBuiltEvent {
    pub events: usize,
    pub resolved_events: usize,
    pub bad_events: usize,
}

/// Payload for `on_bad_event`.
#[derive(Debug, Clone)]
pub struct BadEventReportedEvent {
    pub event_id: EventId,
    /// `depends_on_*` list of the rejected clause, if a clause was rejected.
    pub clause: Option<String>,
    pub error_code: String,
    pub message: String,
}

/// Payload for `on_simulation_started`.
#[derive(Debug, Clone)]
pub struct SimulationStartedEvent {
    pub iterations: u64,
    pub seed: u64,
    pub workers: usize,
    pub resolved_events: usize,
}

/// Payload for `on_trials_progress`.
#[derive(Debug, Clone)]
pub struct TrialsProgressEvent {
    pub completed: u64,
    pub total: u64,
}

/// Payload for `on_simulation_complete`.
#[derive(Debug, Clone)]
pub struct SimulationCompleteEvent {
    pub iterations: u64,
    pub results: usize,
    pub bad_events: usize,
    pub duration_ms: u64,
}

/// Payload for `on_simulation_cancelled`.
#[derive(Debug, Clone)]
pub struct SimulationCancelledEvent {
    pub completed: u64,
    pub total: u64,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
