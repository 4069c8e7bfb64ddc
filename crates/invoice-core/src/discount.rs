//! # Discounts
//!
//! Two independent contributions, summed by the engine:
//!
//! ```text
//! membership_discount                    coupon_discount
//! ───────────────────                    ───────────────
//! gold      → 3% of subtotal             none / blank  → 0
//! platinum  → 5% of subtotal             known code    → subtotal × rate
//! other     → 20 flat if subtotal > 3000 unknown code  → 0 + Warning::UnknownCoupon
//!             else 0
//! ```
//!
//! The sum is not capped: a large coupon on a gold order can exceed the
//! subtotal. The total is clamped later, not the discount.

use tracing::debug;

use crate::coupon::CouponTable;
use crate::money::Money;
use crate::types::{DiscountRate, MembershipTier, Warning};

const GOLD_RATE: DiscountRate = DiscountRate::from_bps(300);
const PLATINUM_RATE: DiscountRate = DiscountRate::from_bps(500);

/// Standard members get the flat discount strictly above this subtotal.
const STANDARD_FLAT_THRESHOLD: Money = Money::from_major(3000);
const STANDARD_FLAT_DISCOUNT: Money = Money::from_major(20);

/// Discount earned by the customer's membership tier.
pub fn membership_discount(tier: MembershipTier, subtotal: Money) -> Money {
    match tier {
        MembershipTier::Gold => subtotal.discount_amount(GOLD_RATE),
        MembershipTier::Platinum => subtotal.discount_amount(PLATINUM_RATE),
        MembershipTier::Standard => {
            if subtotal > STANDARD_FLAT_THRESHOLD {
                STANDARD_FLAT_DISCOUNT
            } else {
                Money::zero()
            }
        }
    }
}

/// Discount from an optional coupon.
///
/// `coupon` is the raw input; surrounding whitespace is ignored and a
/// blank code counts as no coupon. An unrecognized code contributes
/// nothing and pushes [`Warning::UnknownCoupon`] onto `warnings`.
///
/// ## Example
/// ```rust
/// use invoice_core::coupon::CouponTable;
/// use invoice_core::discount::coupon_discount;
/// use invoice_core::money::Money;
///
/// let table = CouponTable::default();
/// let mut warnings = Vec::new();
///
/// let off = coupon_discount(&table, Some(" VIP20 "), Money::from_major(1000), &mut warnings);
/// assert_eq!(off, Money::from_major(200));
/// assert!(warnings.is_empty());
/// ```
pub fn coupon_discount(
    coupons: &CouponTable,
    coupon: Option<&str>,
    subtotal: Money,
    warnings: &mut Vec<Warning>,
) -> Money {
    let Some(code) = coupon.map(str::trim).filter(|code| !code.is_empty()) else {
        return Money::zero();
    };

    match coupons.rate_for(code) {
        Some(rate) => subtotal.discount_amount(rate),
        None => {
            debug!(code = %code, "Unknown coupon");
            warnings.push(Warning::UnknownCoupon);
            Money::zero()
        }
    }
}
