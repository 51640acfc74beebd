//! Error type for the prediction core

use thiserror::Error;

/// Failures the prediction core can report.
///
/// Unknown multiplier keys are not errors: they fall back to a neutral
/// multiplier of 1.00.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown commodity: {0}")]
    UnknownCommodity(String),
}

impl PredictionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PredictionError::InvalidInput(message.into())
    }
}

/// Result type alias for the prediction core
pub type CoreResult<T> = Result<T, PredictionError>;
