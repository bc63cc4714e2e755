//! # Batch Processing
//!
//! Flat-file transactions, one `amount_owed,amount_paid` pair per line.
//!
//! ## Input → Output
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────────────────┐
//! │ 2.12,3.00            │  ───►  │ 3 quarters,1 dime,3 pennies              │
//! │ 3.33,5.00            │  ───►  │ 1 dollar,2 quarters,17 pennies (random)  │
//! │ 2.50,2.50            │  ───►  │ No change                                │
//! │ 5.00,3.00            │  ───►  │ Line 4: Insufficient payment             │
//! │ abc                  │  ───►  │ Line 5: Invalid format - expected ...    │
//! └──────────────────────┘        └──────────────────────────────────────────┘
//! ```
//!
//! Blank lines are skipped but still count toward line numbers. The text is
//! handed in by the caller; this module never touches the file system.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use crate::calculator::ChangeCalculator;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Breakdown, ChangeResult};
use crate::validation::{parse_amount, split_transaction_line, validate_divisor};
use crate::DEFAULT_DIVISOR;

// =============================================================================
// Line Errors
// =============================================================================

/// Why a single line produced no change.
#[derive(Debug, Error)]
pub enum LineError {
    /// Not exactly two comma-separated fields.
    #[error("Invalid format - expected 'amount_owed,amount_paid'")]
    InvalidFormat,

    /// A field is not a decimal number.
    #[error("Invalid number format - {0}")]
    InvalidNumber(String),

    #[error("Insufficient payment")]
    InsufficientPayment,

    /// Anything else the calculator rejected.
    #[error("Error - {0}")]
    Calculation(CoreError),
}

impl From<CoreError> for LineError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InsufficientPayment { .. } => LineError::InsufficientPayment,
            other => LineError::Calculation(other),
        }
    }
}

// =============================================================================
// Report Types
// =============================================================================

/// Detailed outcome of one non-blank line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineResult {
    /// 1-based line number in the input.
    pub line_number: usize,
    /// The trimmed line text.
    pub input: String,
    pub success: bool,
    #[ts(type = "string | null")]
    pub change_amount: Option<Decimal>,
    pub change_minor_units: Option<i64>,
    pub formatted_change: Option<String>,
    #[ts(type = "Record<string, number> | null")]
    pub denominations: Option<Breakdown>,
    pub is_random: Option<bool>,
    pub error: Option<String>,
}

impl LineResult {
    fn succeeded(line_number: usize, input: &str, result: ChangeResult, formatted: String) -> Self {
        let change = Money::from_cents(result.total_minor_units);
        LineResult {
            line_number,
            input: input.to_string(),
            success: true,
            change_amount: Some(change.to_decimal()),
            change_minor_units: Some(change.cents()),
            formatted_change: Some(formatted),
            denominations: Some(result.denominations),
            is_random: Some(result.is_random),
            error: None,
        }
    }

    fn failed(line_number: usize, input: &str, error: &LineError) -> Self {
        LineResult {
            line_number,
            input: input.to_string(),
            success: false,
            change_amount: None,
            change_minor_units: None,
            formatted_change: None,
            denominations: None,
            is_random: None,
            error: Some(error.to_string()),
        }
    }
}

/// Summary of a whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BatchReport {
    /// Lines in the input, blank ones included.
    pub total_lines: usize,
    pub processed_lines: usize,
    pub error_lines: usize,
    pub results: Vec<LineResult>,
}

// =============================================================================
// Batch Processor
// =============================================================================

/// Runs every line of a transaction file through one calculator.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    calculator: ChangeCalculator,
    divisor: u32,
    seed: Option<u64>,
}

impl BatchProcessor {
    /// Processor with the default divisor (3) and no seed.
    pub fn new(calculator: ChangeCalculator) -> Self {
        BatchProcessor {
            calculator,
            divisor: DEFAULT_DIVISOR,
            seed: None,
        }
    }

    /// Sets the divisor of the random-change rule.
    pub fn with_divisor(mut self, divisor: u32) -> CoreResult<Self> {
        validate_divisor(divisor)?;
        self.divisor = divisor;
        Ok(self)
    }

    /// Seeds every random line (each line restarts from the same seed).
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn calculator(&self) -> &ChangeCalculator {
        &self.calculator
    }

    /// One output line per non-blank input line.
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::batch::BatchProcessor;
    /// use changemaker_core::{ChangeCalculator, Locale};
    ///
    /// let processor = BatchProcessor::new(ChangeCalculator::for_locale(Locale::EnUs));
    /// let output = processor.process_plain("2.12,3.00\n\n5.00,3.00\n2.50,2.50");
    ///
    /// assert_eq!(output, vec![
    ///     "3 quarters,1 dime,3 pennies",
    ///     "Line 3: Insufficient payment",
    ///     "No change",
    /// ]);
    /// ```
    pub fn process_plain(&self, input: &str) -> Vec<String> {
        numbered_lines(input)
            .filter(|(_, line)| !line.is_empty())
            .map(|(line_number, line)| match self.evaluate(line) {
                Ok((_, formatted)) => formatted,
                Err(error) => format!("Line {}: {}", line_number, error),
            })
            .collect()
    }

    /// Structured results plus counts.
    pub fn process_detailed(&self, input: &str) -> BatchReport {
        let mut total_lines = 0;
        let mut results = Vec::new();

        for (line_number, line) in numbered_lines(input) {
            total_lines += 1;
            if line.is_empty() {
                continue;
            }

            let result = match self.evaluate(line) {
                Ok((change, formatted)) => LineResult::succeeded(line_number, line, change, formatted),
                Err(error) => LineResult::failed(line_number, line, &error),
            };
            results.push(result);
        }

        let processed_lines = results.iter().filter(|r| r.success).count();
        tracing::debug!(total_lines, processed_lines, "batch processed");

        BatchReport {
            total_lines,
            processed_lines,
            error_lines: results.len() - processed_lines,
            results,
        }
    }

    fn evaluate(&self, line: &str) -> Result<(ChangeResult, String), LineError> {
        let (owed, paid) = split_transaction_line(line).map_err(|_| LineError::InvalidFormat)?;
        let owed = parse_amount("amount_owed", owed)
            .map_err(|e| LineError::InvalidNumber(e.to_string()))?;
        let paid = parse_amount("amount_paid", paid)
            .map_err(|e| LineError::InvalidNumber(e.to_string()))?;

        // Compared before cent rounding: 3.001 owed against 3.00 paid is short.
        if paid < owed {
            return Err(LineError::InsufficientPayment);
        }

        let result = self
            .calculator
            .calculate_change(owed, paid, self.divisor, self.seed)?;
        let formatted = self.calculator.format_change_string(&result.denominations);

        Ok((result, formatted))
    }
}

/// Trimmed input split on `\n`, each line trimmed, numbered from 1.
fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .trim()
        .split('\n')
        .map(str::trim)
        .enumerate()
        .map(|(index, line)| (index + 1, line))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Locale;
    use rust_decimal_macros::dec;

    fn processor() -> BatchProcessor {
        BatchProcessor::new(ChangeCalculator::for_locale(Locale::EnUs))
    }

    #[test]
    fn test_plain_output() {
        let output = processor().process_plain("2.12,3.00\n2.50,2.50\n5.00,3.00\n");
        assert_eq!(
            output,
            vec![
                "3 quarters,1 dime,3 pennies".to_string(),
                "No change".to_string(),
                "Line 3: Insufficient payment".to_string(),
            ]
        );
    }

    #[test]
    fn test_plain_random_line_sums() {
        let processor = processor().with_seed(Some(5));
        let output = processor.process_plain("3.33,5.00");
        assert_eq!(output.len(), 1);
        assert_ne!(output[0], "No change");

        // Seeded, so repeatable
        assert_eq!(processor.process_plain("3.33,5.00"), output);
    }

    #[test]
    fn test_format_errors() {
        let output = processor().process_plain("2.12\n1,2,3\nabc,3.00\n2.12,");
        assert_eq!(output[0], "Line 1: Invalid format - expected 'amount_owed,amount_paid'");
        assert_eq!(output[1], "Line 2: Invalid format - expected 'amount_owed,amount_paid'");
        assert!(output[2].starts_with("Line 3: Invalid number format - amount_owed"));
        assert!(output[3].starts_with("Line 4: Invalid number format - amount_paid"));
    }

    #[test]
    fn test_blank_lines_keep_numbering() {
        let output = processor().process_plain("\n2.12,3.00\n\n   \nbad\n");
        assert_eq!(output.len(), 2);
        // Leading/trailing whitespace is trimmed first, so "bad" is line 4
        assert_eq!(output[1], "Line 4: Invalid format - expected 'amount_owed,amount_paid'");
    }

    #[test]
    fn test_windows_line_endings() {
        let output = processor().process_plain("2.12,3.00\r\n2.50,2.50\r\n");
        assert_eq!(output, vec!["3 quarters,1 dime,3 pennies", "No change"]);
    }

    #[test]
    fn test_detailed_report() {
        let report = processor().process_detailed("2.12,3.00\n\n5.00,3.00\n2.50,2.50");

        assert_eq!(report.total_lines, 4);
        assert_eq!(report.processed_lines, 2);
        assert_eq!(report.error_lines, 1);
        assert_eq!(report.results.len(), 3);

        let first = &report.results[0];
        assert!(first.success);
        assert_eq!(first.line_number, 1);
        assert_eq!(first.input, "2.12,3.00");
        assert_eq!(first.change_amount, Some(dec!(0.88)));
        assert_eq!(first.change_minor_units, Some(88));
        assert_eq!(first.is_random, Some(false));
        assert_eq!(first.formatted_change.as_deref(), Some("3 quarters,1 dime,3 pennies"));

        let second = &report.results[1];
        assert!(!second.success);
        assert_eq!(second.line_number, 3);
        assert_eq!(second.error.as_deref(), Some("Insufficient payment"));
        assert!(second.denominations.is_none());

        let third = &report.results[2];
        assert!(third.success);
        assert_eq!(third.formatted_change.as_deref(), Some("No change"));
        assert_eq!(third.change_minor_units, Some(0));
        assert!(third.denominations.as_ref().is_some_and(Breakdown::is_empty));
    }

    #[test]
    fn test_empty_input() {
        let report = processor().process_detailed("");
        assert_eq!(report.total_lines, 1);
        assert!(report.results.is_empty());
        assert!(processor().process_plain("   \n  ").is_empty());
    }

    #[test]
    fn test_divisor_controls_dispatch() {
        // 212 % 4 == 0 → random
        let report = processor()
            .with_divisor(4)
            .unwrap()
            .with_seed(Some(3))
            .process_detailed("2.12,3.00");
        assert_eq!(report.results[0].is_random, Some(true));
        assert_eq!(report.results[0].change_minor_units, Some(88));

        assert!(processor().with_divisor(0).is_err());
    }

    #[test]
    fn test_sub_cent_shortfall_is_insufficient() {
        let output = processor().process_plain("3.001,3.00\n3.00,3.001");
        assert_eq!(output, vec!["Line 1: Insufficient payment", "No change"]);
    }

    #[test]
    fn test_oversized_line_does_not_stop_batch() {
        let output = processor().process_plain("0.01,92233720368547758.07\n2.12,3.00");
        assert_eq!(output.len(), 2);
        assert!(output[0].starts_with("Line 1: Error - Amount out of range"));
        assert_eq!(output[1], "3 quarters,1 dime,3 pennies");

        let report = processor().process_detailed("2.12,3.00\n0.00,100000.01\n1.97,2.00");
        assert_eq!(report.processed_lines, 2);
        assert_eq!(report.error_lines, 1);
        assert_eq!(report.results[1].line_number, 2);
        assert!(report.results[1]
            .error
            .as_deref()
            .is_some_and(|e| e.starts_with("Error - Amount out of range")));
        assert_eq!(report.results[2].formatted_change.as_deref(), Some("3 pennies"));
    }

    #[test]
    fn test_euro_batch() {
        let processor = BatchProcessor::new(ChangeCalculator::for_locale(Locale::FrFr));
        assert_eq!(processor.process_plain("1.00,2.00"), vec!["1 euro"]);
        assert_eq!(processor.calculator().locale(), Locale::FrFr);
    }

    #[test]
    fn test_line_error_messages() {
        assert_eq!(
            LineError::from(CoreError::UnsatisfiableChange { change_minor: 3 }).to_string(),
            "Error - Cannot make change for 3 minor units"
        );
        assert_eq!(
            LineError::from(CoreError::InsufficientPayment {
                owed: Money::from_cents(2),
                paid: Money::from_cents(1),
            })
            .to_string(),
            "Insufficient payment"
        );
    }

    #[test]
    fn test_report_json_shape() {
        let report = processor().process_detailed("2.12,3.00\nbad");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_lines"], 2);
        assert_eq!(json["results"][0]["denominations"]["quarter"], 3);
        assert_eq!(json["results"][1]["success"], false);
        assert!(json["results"][1]["change_amount"].is_null());
    }
}
