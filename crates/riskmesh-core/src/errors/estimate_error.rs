//! Estimate errors. All of them are fatal to a simulation run.

use super::error_code::{self, RiskmeshErrorCode};

/// Errors raised while decoding or sampling an estimate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("InvalidTimeframe: unknown timeframe tag {tag}")]
    InvalidTimeframe { tag: u64 },

    #[error("MalformedEstimate: {reason}")]
    MalformedEstimate { reason: String },

    #[error("NilComponent: component '{component_id}' carries no estimate")]
    NilComponent { component_id: String },

    #[error("Non-finite {field} value in estimate")]
    NonFiniteValue { field: &'static str },
}

impl RiskmeshErrorCode for EstimateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTimeframe { .. } => error_code::INVALID_TIMEFRAME,
            Self::MalformedEstimate { .. } => error_code::MALFORMED_ESTIMATE,
            Self::NilComponent { .. } => error_code::NIL_COMPONENT,
            Self::NonFiniteValue { .. } => error_code::NON_FINITE_VALUE,
        }
    }
}
