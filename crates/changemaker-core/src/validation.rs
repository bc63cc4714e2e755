//! # Validation Module
//!
//! Input validation utilities for Changemaker.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI flags, JSON request)                          │
//! │  ├── Type validation (parsing, deserialization)                        │
//! │  └── THIS MODULE: request rules (amounts ≥ 0, divisor > 0)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog construction                                         │
//! │  └── THIS MODULE: positive values, non-empty names                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator                                                   │
//! │  └── paid ≥ owed (InsufficientPayment)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::ChangeRequest;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates the divisor of the random-change rule.
///
/// ## Rules
/// - Must be positive (> 0); a zero divisor has no remainder to test
///
/// ## Example
/// ```rust
/// use changemaker_core::validation::validate_divisor;
///
/// assert!(validate_divisor(3).is_ok());
/// assert!(validate_divisor(0).is_err());
/// ```
pub fn validate_divisor(divisor: u32) -> ValidationResult<()> {
    if divisor == 0 {
        return Err(ValidationError::MustBePositive {
            field: "divisor".to_string(),
        });
    }

    Ok(())
}

/// Validates that a request amount is not negative.
pub fn validate_amount(field: &str, amount: Decimal) -> ValidationResult<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a whole [`ChangeRequest`] before it reaches the calculator.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Front end submits { owed: 2.12, paid: 3.00, divisor: 3 }               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_request ← THIS FUNCTION                                      │
/// │       │                                                                 │
/// │       ├── owed < 0 or paid < 0? → OutOfRange                           │
/// │       ├── divisor == 0?         → MustBePositive                       │
/// │       └── OK → calculate_change                                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_request(request: &ChangeRequest) -> ValidationResult<()> {
    validate_amount("amount_owed", request.amount_owed)?;
    validate_amount("amount_paid", request.amount_paid)?;
    validate_divisor(request.divisor)
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates one denomination definition.
///
/// ## Rules
/// - Value must be positive (> 0)
/// - Singular and plural names must not be blank
pub fn validate_denomination(value_minor: i64, singular: &str, plural: &str) -> ValidationResult<()> {
    if value_minor <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "denomination value".to_string(),
        });
    }

    if singular.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "singular name".to_string(),
        });
    }

    if plural.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "plural name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses a decimal amount such as `"2.12"`, `"3"` or `"1e2"`.
///
/// ## Example
/// ```rust
/// use changemaker_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("amount_owed", " 2.12 ").unwrap().to_string(), "2.12");
/// assert!(parse_amount("amount_owed", "two").is_err());
/// ```
pub fn parse_amount(field: &str, text: &str) -> ValidationResult<Decimal> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("'{}' is not a decimal number", text),
        })
}

/// Splits a transaction line `"owed,paid"` into its two fields.
pub fn split_transaction_line(line: &str) -> ValidationResult<(&str, &str)> {
    let mut parts = line.split(',');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(owed), Some(paid), None) => Ok((owed.trim(), paid.trim())),
        _ => Err(ValidationError::InvalidFormat {
            field: "line".to_string(),
            reason: "expected 'amount_owed,amount_paid'".to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
