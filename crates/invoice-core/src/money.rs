//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  An invoice sums prices, fees, discounts and tax. Every float step      │
//! │  can drift, and the drift shows up on the customer's bill.              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Sums are exact. Only rate application (tax, % discounts) rounds,    │
//! │    and it rounds once, to the nearest cent, half away from zero.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::money::Money;
//!
//! let price = Money::from_cents(1099); // 10.99
//!
//! let doubled = price * 2;                    // 21.98
//! let total = price + Money::from_cents(500); // 15.99
//! assert_eq!(total.cents(), 1599);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{DiscountRate, TaxRate};

/// Basis points in 100%.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: tax on a negative base is negative, and the raw
///   total can dip below zero before clamping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Currency-agnostic**: the invoice carries no currency, neither do we
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price ──► × qty ──► subtotal ──┬──► shipping bracket
///                                              ├──► membership / coupon discount
///                                              └──► tax base (subtotal - discount)
///
/// subtotal + shipping + fragile_fee + tax - discount ──► total (>= 0)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Creates a Money value from whole major units.
    ///
    /// Rule tables (shipping brackets, flat discounts) are written in
    /// whole units, this keeps them readable.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Floors the value at zero.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(550).clamp_non_negative().cents(), 550);
    /// ```
    #[inline]
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// let line_total = Money::from_cents(299).multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// `self * qty`, or `None` if the product does not fit.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(299).checked_multiply_quantity(3), Some(Money::from_cents(897)));
    /// assert_eq!(Money::from_cents(i64::MAX / 2).checked_multiply_quantity(3), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// `self + other`, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Calculates tax on this amount.
    ///
    /// The amount may be negative (a discount larger than the subtotal),
    /// in which case so is the tax.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    /// use invoice_core::types::TaxRate;
    ///
    /// let base = Money::from_major(900);
    /// let tax = base.calculate_tax(TaxRate::from_bps(700)); // 7%
    /// assert_eq!(tax, Money::from_major(63));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.apply_bps(rate.bps())
    }

    /// Returns the discount this rate takes off the amount.
    ///
    /// Unlike a "discounted price" helper this returns the discount itself,
    /// since membership and coupon discounts are summed before use.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::money::Money;
    /// use invoice_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_major(1000);
    /// let off = subtotal.discount_amount(DiscountRate::from_bps(1000)); // 10%
    /// assert_eq!(off, Money::from_major(100));
    /// ```
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        self.apply_bps(rate.bps())
    }

    /// `self * bps / 10000`, rounded to the nearest cent, half away from zero.
    fn apply_bps(&self, bps: u32) -> Money {
        // i128 so large invoices cannot overflow the intermediate product
        let product = self.0 as i128 * bps as i128;
        let half = BPS_SCALE / 2;
        let rounded = if product >= 0 {
            (product + half) / BPS_SCALE
        } else {
            (product - half) / BPS_SCALE
        };
        // saturates; validated invoices stay far below the i64 range
        let cents = i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, e.g. `224.00` or `-5.50`.
///
/// ## Note
/// For logs and debugging. Currency symbols and localization belong to
/// whoever presents the invoice.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
