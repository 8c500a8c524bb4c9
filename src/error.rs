//! Error types for the supply-forecast engine.

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur inside the engine.
///
/// Data-sufficiency conditions (short history, failed fits, missing inventory)
/// are not errors; they surface as fallback forecasts or `None`. Only
/// [`ForecastError::Source`] and [`ForecastError::Config`] reach callers of
/// [`ForecastingEngine`](crate::engine::ForecastingEngine).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// Computation error (e.g., numerical issues).
    #[error("computation error: {0}")]
    ComputationError(String),

    /// Engine configuration could not be loaded or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// The consumption log or inventory store failed to answer.
    #[error("data source error: {0}")]
    Source(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InsufficientData { needed: 5, got: 3 };
        assert_eq!(err.to_string(), "insufficient data: need at least 5, got 3");

        let err = ForecastError::DimensionMismatch {
            expected: 31,
            got: 30,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 31, got 30");

        let err = ForecastError::FitRequired;
        assert_eq!(err.to_string(), "model must be fitted before prediction");

        let err = ForecastError::Source("connection reset".to_string());
        assert_eq!(err.to_string(), "data source error: connection reset");

        let err = ForecastError::Config("days_back must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: days_back must be positive"
        );
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::Source("timeout".into());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
