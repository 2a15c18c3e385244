//! Catalog loading and validation errors.

use super::error_code::{self, RiskmeshErrorCode};
use super::EstimateError;

/// Errors that can occur while reading or validating an event catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Cannot read catalog {path}: {message}")]
    Io { path: String, message: String },

    #[error("Catalog parse error: {message}")]
    Parse { message: String },

    #[error("Duplicate {reference} in catalog")]
    DuplicateId { reference: String },

    #[error("Invalid value at {path}: {message}")]
    InvalidValue { path: String, message: String },

    #[error("Invalid estimate at {path}: {source}")]
    Estimate {
        path: String,
        #[source]
        source: EstimateError,
    },
}

impl RiskmeshErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } => error_code::DUPLICATE_ID,
            Self::Estimate { source, .. } => source.error_code(),
            _ => error_code::CATALOG_ERROR,
        }
    }
}
