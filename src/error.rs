//! Error types for the bpselect study pipeline

use thiserror::Error;

/// Result type alias for bpselect operations
pub type Result<T> = std::result::Result<T, BpSelectError>;

/// Main error type for the study pipeline
#[derive(Error, Debug)]
pub enum BpSelectError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Cleaning error: {0}")]
    CleaningError(String),

    #[error("Training error: {0}")]
    TrainingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<polars::error::PolarsError> for BpSelectError {
    fn from(err: polars::error::PolarsError) -> Self {
        BpSelectError::DataError(err.to_string())
    }
}

impl From<serde_json::Error> for BpSelectError {
    fn from(err: serde_json::Error) -> Self {
        BpSelectError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BpSelectError::DataError("missing sheet".to_string());
        assert_eq!(err.to_string(), "Data error: missing sheet");
    }

    #[test]
    fn test_shape_error_display() {
        let err = BpSelectError::ShapeError {
            expected: "y length = 10".to_string(),
            actual: "y length = 8".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid shape: expected y length = 10, got y length = 8");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BpSelectError = io_err.into();
        assert!(matches!(err, BpSelectError::IoError(_)));
    }
}
