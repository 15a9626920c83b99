//! # Error Types
//!
//! Domain-specific error types for caisse-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Boundaries                                │
//! │                                                                         │
//! │  Engine operations (decompose, compute_change, quick amounts)          │
//! │  └── TOTAL: defined for every input, never return an error             │
//! │                                                                         │
//! │  Edges (this file)                                                     │
//! │  ├── ValidationError  - strict amount parsing, custom table checks     │
//! │  └── CoreError        - wraps ValidationError, engine setup failures   │
//! │                                                                         │
//! │  caisse-cli errors (separate crate)                                    │
//! │  └── CliError         - config, output, wraps CoreError                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while setting up or driving the engine from the outside.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A denomination table failed its greedy canonicity check.
    ///
    /// Greedy decomposition is only minimal for canonical tables, so a table
    /// reaching this state must not be used for change breakdowns.
    #[error("Denomination table is not greedy-canonical: {amount} needs {optimal} pieces, greedy gives {greedy}")]
    NonCanonicalTable {
        amount: i64,
        optimal: u64,
        greedy: u64,
    },

    /// The amount range requested for a canonicity check is too large to
    /// enumerate.
    #[error("Canonicity check limit {limit} exceeds the maximum of {max}")]
    CheckLimitTooLarge { limit: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. letters in an amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g. the same denomination listed twice).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },

    /// Values are not in the required order.
    #[error("{field} must be strictly descending")]
    NotDescending { field: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "total".to_string(),
        };
        assert_eq!(err.to_string(), "total is required");

        let err = ValidationError::Duplicate {
            field: "denomination".to_string(),
            value: "500".to_string(),
        };
        assert_eq!(err.to_string(), "denomination '500' appears more than once");
    }

    #[test]
    fn test_non_canonical_message() {
        let err = CoreError::NonCanonicalTable {
            amount: 6,
            optimal: 2,
            greedy: 3,
        };
        assert_eq!(
            err.to_string(),
            "Denomination table is not greedy-canonical: 6 needs 2 pieces, greedy gives 3"
        );
    }

    #[test]
    fn test_check_limit_message() {
        let err = CoreError::CheckLimitTooLarge {
            limit: i64::MAX,
            max: 1_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Canonicity check limit 9223372036854775807 exceeds the maximum of 1000000"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "tendered".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
