//! RiskmeshErrorCode trait and the stable code strings it returns.

/// Trait giving every riskmesh error a stable machine-readable code.
/// Reports and the CLI print `[CODE] message` so failures can be matched
/// without parsing prose.
pub trait RiskmeshErrorCode {
    /// Returns the code string (e.g., "INVALID_TIMEFRAME").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_TIMEFRAME: &str = "INVALID_TIMEFRAME";
pub const MALFORMED_ESTIMATE: &str = "MALFORMED_ESTIMATE";
pub const NIL_COMPONENT: &str = "NIL_COMPONENT";
pub const NON_FINITE_VALUE: &str = "NON_FINITE_VALUE";
pub const MISSING_REFERENCE: &str = "MISSING_REFERENCE";
pub const REJECTED_TARGET: &str = "REJECTED_TARGET";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const PAYLOAD_MISMATCH: &str = "PAYLOAD_MISMATCH";
pub const DEPTH_EXCEEDED: &str = "DEPTH_EXCEEDED";
pub const INVALID_OPERATOR: &str = "INVALID_OPERATOR";
pub const RNG_FAILURE: &str = "RNG_FAILURE";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const DUPLICATE_ID: &str = "DUPLICATE_ID";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_ITERATIONS: &str = "INVALID_ITERATIONS";
pub const WORKER_POOL: &str = "WORKER_POOL";
pub const CANCELLED: &str = "CANCELLED";
