//! # changemaker-core: Pure Change-Making Logic
//!
//! This crate is the **heart** of Changemaker. It decides which coins and
//! bills a cashier hands back, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Changemaker Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front ends (CLI, web, batch files)              │   │
//! │  │    owed/paid ──► ChangeRequest / transaction lines              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ changemaker-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ calculator │  │  solver   │  │  format   │  │   │
//! │  │   │ USD / EUR │─►│  dispatch  │─►│ min / rnd │─►│ "3 dimes" │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • INTEGER MINOR UNITS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Denominations and per-locale catalogs
//! - [`registry`] - Locale → catalog configuration
//! - [`calculator`] - The change orchestrator
//! - [`solver`] - Minimum-piece DP and random decomposition
//! - [`format`] - Pluralized change strings
//! - [`batch`] - `owed,paid` flat-file processing
//! - [`money`] - Integer minor-unit money
//! - [`types`] - Locale, results, requests, receipts
//! - [`validation`] - Input rules and parsers
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use changemaker_core::{CurrencyRegistry, Locale};
//! use rust_decimal::Decimal;
//!
//! let registry = CurrencyRegistry::standard();
//! let calculator = registry.calculator(Locale::EnUs).unwrap();
//!
//! // $2.12 owed, $3.00 paid, divisor 3: 212 % 3 != 0 → minimum change
//! let result = calculator
//!     .calculate_change(Decimal::new(212, 2), Decimal::new(300, 2), 3, None)
//!     .unwrap();
//!
//! assert!(!result.is_random);
//! assert_eq!(
//!     calculator.format_change_string(&result.denominations),
//!     "3 quarters,1 dime,3 pennies"
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod calculator;
pub mod catalog;
pub mod error;
pub mod format;
pub mod money;
pub mod registry;
pub mod solver;
pub mod types;
pub mod validation;

#[cfg(test)]
mod props;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use batch::{BatchProcessor, BatchReport, LineResult};
pub use calculator::ChangeCalculator;
pub use catalog::{Catalog, Denomination};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use registry::CurrencyRegistry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default divisor of the random-change rule.
///
/// Owed amounts (in minor units) divisible by this get random change.
pub const DEFAULT_DIVISOR: u32 = 3;
