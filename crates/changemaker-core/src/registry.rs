//! # Currency Registry
//!
//! Explicit locale → catalog configuration, built once at startup and passed
//! to whoever needs a calculator. There is no process-wide table.
//!
//! ```text
//! CurrencyRegistry::standard()
//!   ├── en-US → Arc<Catalog> (USD)
//!   └── fr-FR → Arc<Catalog> (EUR)
//!
//! registry.calculator(locale)?  ──► ChangeCalculator (shares the Arc)
//! registry.quote(&request)?     ──► ChangeReceipt
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::calculator::ChangeCalculator;
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ChangeReceipt, ChangeRequest, Locale};
use crate::validation::validate_request;

/// Read-only set of catalogs, one per locale.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRegistry {
    catalogs: BTreeMap<Locale, Arc<Catalog>>,
}

impl CurrencyRegistry {
    /// A registry with no catalogs; add them with [`register`](Self::register).
    pub fn empty() -> Self {
        CurrencyRegistry::default()
    }

    /// Registry with every built-in catalog (USD, EUR).
    pub fn standard() -> Self {
        Locale::ALL
            .into_iter()
            .fold(CurrencyRegistry::empty(), |registry, locale| {
                registry.register(Catalog::for_locale(locale))
            })
    }

    /// Adds (or replaces) the catalog for its locale.
    pub fn register(mut self, catalog: Catalog) -> Self {
        self.catalogs.insert(catalog.locale(), Arc::new(catalog));
        self
    }

    /// The catalog for `locale`.
    ///
    /// ## Errors
    /// [`CoreError::UnsupportedLocale`] if none is registered.
    pub fn catalog(&self, locale: Locale) -> CoreResult<Arc<Catalog>> {
        self.catalogs
            .get(&locale)
            .cloned()
            .ok_or_else(|| CoreError::UnsupportedLocale(locale.to_string()))
    }

    /// The catalog for a locale tag such as `"fr-FR"`.
    pub fn catalog_for_tag(&self, tag: &str) -> CoreResult<Arc<Catalog>> {
        self.catalog(tag.parse()?)
    }

    /// A calculator sharing the registered catalog.
    pub fn calculator(&self, locale: Locale) -> CoreResult<ChangeCalculator> {
        Ok(ChangeCalculator::new(self.catalog(locale)?))
    }

    /// Registered locales in stable order (en-US first).
    pub fn supported_locales(&self) -> Vec<Locale> {
        self.catalogs.keys().copied().collect()
    }

    /// Validates a request and answers it with a formatted receipt.
    ///
    /// ## Example
    /// ```rust
    /// use changemaker_core::{ChangeRequest, CurrencyRegistry};
    /// use rust_decimal::Decimal;
    ///
    /// let registry = CurrencyRegistry::standard();
    /// let request = ChangeRequest::new(Decimal::new(212, 2), Decimal::new(300, 2));
    /// let receipt = registry.quote(&request).unwrap();
    ///
    /// assert_eq!(receipt.change_minor_units, 88);
    /// assert_eq!(receipt.formatted_change, "3 quarters,1 dime,3 pennies");
    /// ```
    pub fn quote(&self, request: &ChangeRequest) -> CoreResult<ChangeReceipt> {
        validate_request(request)?;

        let calculator = self.calculator(request.locale)?;
        let result = calculator.calculate_change(
            request.amount_owed,
            request.amount_paid,
            request.divisor,
            request.seed,
        )?;
        let formatted_change = calculator.format_change_string(&result.denominations);
        let change = Money::from_cents(result.total_minor_units);

        Ok(ChangeReceipt {
            change_amount: change.to_decimal(),
            change_minor_units: change.cents(),
            denominations: result.denominations,
            formatted_change,
            is_random: result.is_random,
            locale: request.locale,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_registry() {
        let registry = CurrencyRegistry::standard();
        assert_eq!(registry.supported_locales(), vec![Locale::EnUs, Locale::FrFr]);
        assert_eq!(registry.catalog(Locale::FrFr).unwrap().len(), 12);
        assert_eq!(registry.catalog_for_tag("en-US").unwrap().len(), 10);
    }

    #[test]
    fn test_unknown_tag() {
        let err = CurrencyRegistry::standard()
            .catalog_for_tag("invalid-locale")
            .unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedLocale(_)));
    }

    #[test]
    fn test_unregistered_locale() {
        let registry = CurrencyRegistry::empty().register(Catalog::us_dollar());
        assert!(registry.calculator(Locale::EnUs).is_ok());
        assert!(matches!(
            registry.calculator(Locale::FrFr),
            Err(CoreError::UnsupportedLocale(ref tag)) if tag == "fr-FR"
        ));
    }

    #[test]
    fn test_calculators_share_catalog() {
        let registry = CurrencyRegistry::standard();
        let catalog = registry.catalog(Locale::EnUs).unwrap();
        let _calculator = registry.calculator(Locale::EnUs).unwrap();
        // registry + local handle + calculator
        assert_eq!(Arc::strong_count(&catalog), 3);
    }

    #[test]
    fn test_quote_minimum() {
        let registry = CurrencyRegistry::standard();
        let receipt = registry
            .quote(&ChangeRequest::new(dec!(2.12), dec!(3.00)))
            .unwrap();

        assert_eq!(receipt.change_amount, dec!(0.88));
        assert_eq!(receipt.change_minor_units, 88);
        assert_eq!(receipt.formatted_change, "3 quarters,1 dime,3 pennies");
        assert!(!receipt.is_random);
        assert_eq!(receipt.locale, Locale::EnUs);
    }

    #[test]
    fn test_quote_euro() {
        let registry = CurrencyRegistry::standard();
        let request = ChangeRequest::new(dec!(1.00), dec!(2.00)).with_locale(Locale::FrFr);
        let receipt = registry.quote(&request).unwrap();

        assert_eq!(receipt.change_minor_units, 100);
        assert_eq!(receipt.formatted_change, "1 euro");
        assert_eq!(receipt.locale, Locale::FrFr);
    }

    #[test]
    fn test_quote_random_is_seeded() {
        let registry = CurrencyRegistry::standard();
        let request = ChangeRequest::new(dec!(3.33), dec!(5.00)).with_seed(42);

        let first = registry.quote(&request).unwrap();
        let second = registry.quote(&request).unwrap();
        assert!(first.is_random);
        assert_eq!(first, second);
        assert_eq!(first.change_minor_units, 167);
    }

    #[test]
    fn test_quote_rejects_negative_amounts() {
        let registry = CurrencyRegistry::standard();
        let err = registry
            .quote(&ChangeRequest::new(dec!(-1.00), dec!(2.00)))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_quote_exact_payment() {
        let registry = CurrencyRegistry::standard();
        let receipt = registry
            .quote(&ChangeRequest::new(dec!(2.50), dec!(2.50)))
            .unwrap();
        assert_eq!(receipt.formatted_change, "No change");
        assert_eq!(receipt.change_amount, dec!(0));
    }

    #[test]
    fn test_receipt_json_shape() {
        let registry = CurrencyRegistry::standard();
        let receipt = registry
            .quote(&ChangeRequest::new(dec!(2.12), dec!(3.00)))
            .unwrap();
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["change_amount"], "0.88");
        assert_eq!(json["change_minor_units"], 88);
        assert_eq!(json["denominations"]["quarter"], 3);
        assert_eq!(json["locale"], "en-US");
        assert_eq!(json["is_random"], false);
    }
}
