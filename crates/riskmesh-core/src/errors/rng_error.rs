//! Random source errors.

use super::error_code::{self, RiskmeshErrorCode};

/// Errors raised by the random source.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RngError {
    #[error("RNGFailure: entropy source unavailable: {message}")]
    EntropyUnavailable { message: String },
}

impl RiskmeshErrorCode for RngError {
    fn error_code(&self) -> &'static str {
        error_code::RNG_FAILURE
    }
}
