//! Error types for the financial insights API

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {

    // =============================
    // Caller-Input Errors (HTTP 400)
    // =============================

    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("Value must be a non-empty string")]
    EmptyValue,

    #[error("Invalid number format")]
    InvalidNumberFormat,

    #[error("{0}")]
    NonFiniteValue(String),

    #[error("Value exceeds maximum allowed magnitude ({0:e})")]
    OutOfRange(f64),

    #[error("Invalid operation: {0}. Must be one of: add, subtract, multiply, divide")]
    InvalidOperation(String),

    #[error("Cannot divide by zero")]
    DivideByZero,

    #[error("Calculation resulted in overflow")]
    Overflow,

    #[error("Calculation resulted in underflow")]
    Underflow,

    // =============================
    // Upstream & Internal Errors
    // =============================

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ApiError {
    /// HTTP status the error surfaces as. Caller-input errors are 400,
    /// upstream provider failures 502, everything else 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_)
            | ApiError::EmptyValue
            | ApiError::InvalidNumberFormat
            | ApiError::NonFiniteValue(_)
            | ApiError::OutOfRange(_)
            | ApiError::InvalidOperation(_)
            | ApiError::DivideByZero
            | ApiError::Overflow
            | ApiError::Underflow => StatusCode::BAD_REQUEST,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_are_bad_request() {
        let errors = vec![
            ApiError::MissingParameter("num1".into()),
            ApiError::InvalidNumberFormat,
            ApiError::DivideByZero,
            ApiError::Overflow,
            ApiError::Underflow,
        ];
        for e in errors {
            assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn unexpected_is_internal_error() {
        let e = ApiError::Unexpected("boom".into());
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn divide_by_zero_message_matches_contract() {
        assert_eq!(ApiError::DivideByZero.to_string(), "Cannot divide by zero");
    }
}
