//! # Tax
//!
//! Country tax applied to the discounted subtotal.
//!
//! The base is `subtotal - discount` and is used as-is, so a discount larger
//! than the subtotal produces negative tax.

use crate::money::Money;
use crate::types::{Country, TaxRate};

/// Tax rate for a destination: TH 7%, JP 10%, US 8%, everywhere else 5%.
pub const fn tax_rate_for(country: Country) -> TaxRate {
    match country {
        Country::Th => TaxRate::from_bps(700),
        Country::Jp => TaxRate::from_bps(1000),
        Country::Us => TaxRate::from_bps(800),
        Country::Other => TaxRate::from_bps(500),
    }
}

/// Tax owed on `subtotal - discount`.
///
/// ## Example
/// ```rust
/// use invoice_core::money::Money;
/// use invoice_core::tax::tax_for;
/// use invoice_core::types::Country;
///
/// let tax = tax_for(Country::Th, Money::from_major(1000), Money::from_major(100));
/// assert_eq!(tax, Money::from_major(63));
/// ```
pub fn tax_for(country: Country, subtotal: Money, discount: Money) -> Money {
    (subtotal - discount).calculate_tax(tax_rate_for(country))
}
