//! # Error Types
//!
//! Structured error types for dam_core. A failed analysis always reports
//! which quantity or field went wrong so the caller can decide what to show.
//!
//! ## Example
//!
//! ```rust
//! use dam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_unit_weight(gamma_c: f64) -> CalcResult<()> {
//!     if gamma_c <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "gamma_c".to_string(),
//!             value: gamma_c.to_string(),
//!             reason: "Unit weight must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A design input violates a precondition
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A derived denominator evaluated to zero (degenerate configuration)
    #[error("Division by zero: {quantity} is zero ({context})")]
    DivisionError { quantity: String, context: String },

    /// A square root, power or arc-tangent argument is outside the real domain
    #[error("Domain error in {operation}: argument {argument} - {reason}")]
    DomainError {
        operation: String,
        argument: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionError
    pub fn division(quantity: impl Into<String>, context: impl Into<String>) -> Self {
        CalcError::DivisionError {
            quantity: quantity.into(),
            context: context.into(),
        }
    }

    /// Create a DomainError
    pub fn domain(operation: impl Into<String>, argument: f64, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            operation: operation.into(),
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DivisionError { .. } => "DIVISION_ERROR",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Divide `numerator` by `denominator`, failing with a [`CalcError::DivisionError`]
/// naming `quantity` when the denominator is exactly zero.
pub(crate) fn checked_div(
    numerator: f64,
    denominator: f64,
    quantity: &str,
    context: &str,
) -> CalcResult<f64> {
    if denominator == 0.0 {
        return Err(CalcError::division(quantity, context));
    }
    Ok(numerator / denominator)
}
