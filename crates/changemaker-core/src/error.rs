//! # Error Types
//!
//! Domain-specific error types for changemaker-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  changemaker-core errors (this file)                                   │
//! │  ├── CoreError        - Change computation failures                    │
//! │  └── ValidationError  - Input / catalog validation failures            │
//! │                                                                         │
//! │  CLI errors (apps/cli)                                                 │
//! │  ├── ConfigError      - Bad environment or flag values                 │
//! │  └── CliError         - What the terminal sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (amounts, locale, field)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Change computation errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog is registered for the requested locale.
    ///
    /// ## When This Occurs
    /// - Locale string is not one of the known identifiers
    /// - A custom registry was built without that locale
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// Customer paid less than the amount owed.
    ///
    /// ## User Workflow
    /// ```text
    /// Owed: $5.00, Paid: $3.00
    ///      │
    ///      ▼
    /// change = 300 - 500 = -200
    ///      │
    ///      ▼
    /// InsufficientPayment { owed: 5.00, paid: 3.00 }
    ///      │
    ///      ▼
    /// Request rejected, no retry
    /// ```
    #[error("Insufficient payment: owed {owed}, paid {paid}")]
    InsufficientPayment { owed: Money, paid: Money },

    /// No combination of the catalog's denominations reaches the change.
    ///
    /// Only possible with a catalog lacking a unit (value 1) denomination.
    #[error("Cannot make change for {change_minor} minor units")]
    UnsatisfiableChange { change_minor: i64 },

    /// Amount cannot be represented in integer minor units.
    #[error("Amount out of range: {amount}")]
    AmountOutOfRange { amount: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when a request, a batch line or a catalog definition does not
/// meet requirements. Used for early validation before any solver runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., a non-numeric amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two denominations with the same face value).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPayment {
            owed: Money::from_cents(500),
            paid: Money::from_cents(300),
        };
        assert_eq!(err.to_string(), "Insufficient payment: owed 5.00, paid 3.00");

        let err = CoreError::UnsupportedLocale("de-DE".to_string());
        assert_eq!(err.to_string(), "Unsupported locale: de-DE");

        let err = CoreError::UnsatisfiableChange { change_minor: 3 };
        assert_eq!(err.to_string(), "Cannot make change for 3 minor units");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "divisor".to_string(),
        };
        assert_eq!(err.to_string(), "divisor must be positive");

        let err = ValidationError::Duplicate {
            field: "denomination value".to_string(),
            value: "25".to_string(),
        };
        assert_eq!(err.to_string(), "denomination value '25' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "singular name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
