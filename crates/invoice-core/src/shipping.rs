//! # Shipping
//!
//! Country-tiered shipping fees with free-shipping thresholds.
//!
//! ```text
//! ┌─────────┬──────────────────────────────────────────────┐
//! │ Country │ Fee by subtotal                              │
//! ├─────────┼──────────────────────────────────────────────┤
//! │ TH      │ < 500 → 60        else free                  │
//! │ JP      │ < 4000 → 600      else free                  │
//! │ US      │ < 100 → 15, < 300 → 8, else free             │
//! │ other   │ < 200 → 25        else free                  │
//! └─────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Every bracket's upper bound is exclusive.

use crate::money::Money;
use crate::types::Country;

/// Shipping fee for a subtotal shipped to `country`.
///
/// ## Example
/// ```rust
/// use invoice_core::money::Money;
/// use invoice_core::shipping::shipping_fee;
/// use invoice_core::types::Country;
///
/// assert_eq!(shipping_fee(Country::Us, Money::from_major(200)), Money::from_major(8));
/// assert_eq!(shipping_fee(Country::Th, Money::from_major(500)), Money::zero());
/// ```
pub fn shipping_fee(country: Country, subtotal: Money) -> Money {
    match country {
        Country::Th => flat_below(subtotal, Money::from_major(500), Money::from_major(60)),
        Country::Jp => flat_below(subtotal, Money::from_major(4000), Money::from_major(600)),
        Country::Us => {
            if subtotal < Money::from_major(100) {
                Money::from_major(15)
            } else {
                flat_below(subtotal, Money::from_major(300), Money::from_major(8))
            }
        }
        Country::Other => flat_below(subtotal, Money::from_major(200), Money::from_major(25)),
    }
}

/// `fee` while `subtotal < threshold`, free from the threshold up.
#[inline]
fn flat_below(subtotal: Money, threshold: Money, fee: Money) -> Money {
    if subtotal < threshold {
        fee
    } else {
        Money::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(country: Country, subtotal_cents: i64) -> i64 {
        shipping_fee(country, Money::from_cents(subtotal_cents)).cents()
    }

    #[test]
    fn test_thailand() {
        assert_eq!(fee(Country::Th, 0), 6000);
        assert_eq!(fee(Country::Th, 49_999), 6000);
        assert_eq!(fee(Country::Th, 50_000), 0);
    }

    #[test]
    fn test_japan() {
        assert_eq!(fee(Country::Jp, 100_000), 60_000);
        assert_eq!(fee(Country::Jp, 399_999), 60_000);
        assert_eq!(fee(Country::Jp, 400_000), 0);
    }

    #[test]
    fn test_us_brackets() {
        assert_eq!(fee(Country::Us, 9_999), 1500);
        assert_eq!(fee(Country::Us, 10_000), 800);
        assert_eq!(fee(Country::Us, 29_999), 800);
        assert_eq!(fee(Country::Us, 30_000), 0);
    }

    #[test]
    fn test_default_tier() {
        assert_eq!(fee(Country::Other, 19_999), 2500);
        assert_eq!(fee(Country::Other, 20_000), 0);
    }
}
