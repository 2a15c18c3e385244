//! Dependency errors.
//!
//! Most variants are planning-time rejections: they are attached to a
//! `BadEvent` and the offending clause is dropped. `InvalidOperator` and
//! `DepthExceeded` are fatal when they surface during a run.

use super::error_code::{self, RiskmeshErrorCode};
use crate::model::{Operator, PayloadKind};
use crate::types::EventId;

/// Errors describing why a dependency clause cannot be honoured.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DependencyError {
    #[error("InvalidOperator: unknown operator tag {tag}")]
    InvalidOperator { tag: u64 },

    #[error("MissingReference: depends on missing {reference}")]
    MissingReference { reference: String },

    #[error("{clause} clause does not name a {expected} id")]
    MissingTarget {
        clause: &'static str,
        expected: &'static str,
    },

    #[error("depends on {target}, which was rejected during planning")]
    RejectedTarget { target: EventId },

    #[error("CycleDetected: dependency cycle through {}", format_cycle(.cycle))]
    CycleDetected { cycle: Vec<EventId> },

    #[error("operator {operator} requires a {expected} payload")]
    PayloadMismatch {
        operator: Operator,
        expected: PayloadKind,
    },

    #[error("dependency chain deeper than {max_depth} levels at {event}")]
    DepthExceeded { event: EventId, max_depth: usize },

    #[error("MissingReference: associated {reference} does not exist")]
    MissingAssociation { reference: String },
}

fn format_cycle(cycle: &[EventId]) -> String {
    cycle
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl DependencyError {
    /// Returns true for errors that abort a run instead of rejecting a clause.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InvalidOperator { .. } | Self::DepthExceeded { .. }
        )
    }
}

impl RiskmeshErrorCode for DependencyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidOperator { .. } => error_code::INVALID_OPERATOR,
            Self::MissingReference { .. }
            | Self::MissingTarget { .. }
            | Self::MissingAssociation { .. } => error_code::MISSING_REFERENCE,
            Self::RejectedTarget { .. } => error_code::REJECTED_TARGET,
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            Self::PayloadMismatch { .. } => error_code::PAYLOAD_MISMATCH,
            Self::DepthExceeded { .. } => error_code::DEPTH_EXCEEDED,
        }
    }
}
