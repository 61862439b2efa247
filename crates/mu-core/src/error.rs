//! Error types for mustat

use thiserror::Error;

/// mustat error type
#[derive(Error, Debug)]
pub enum Error {
    /// Per-event particle counts disagree across the pt/eta/phi collections.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The likelihood minimizer did not converge.
    #[error("Optimization failed: {0}")]
    OptimizationFailure(String),

    /// A test statistic is undefined for the sample (zero spread).
    #[error("Degenerate sample: {0}")]
    DegenerateSample(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_detail() {
        let e = Error::ShapeMismatch("event 3: pt has 2 entries, eta has 1".to_string());
        assert_eq!(e.to_string(), "Shape mismatch: event 3: pt has 2 entries, eta has 1");

        let e = Error::OptimizationFailure("MaxItersReached".to_string());
        assert!(e.to_string().contains("MaxItersReached"));
    }

    #[test]
    fn test_json_error_converts() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e: Error = bad.into();
        assert!(matches!(e, Error::Json(_)));
    }
}
