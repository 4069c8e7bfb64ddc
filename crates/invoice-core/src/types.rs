//! # Domain Types
//!
//! Core domain types used by the pricing pipeline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Invoice      │   │    LineItem     │   │ PriceBreakdown  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  invoice_id     │   │  sku            │   │  subtotal       │       │
//! │  │  customer_id    │   │  category (raw) │   │  shipping       │       │
//! │  │  country (raw)  │ ◄─┤  unit_price     │   │  discount, tax  │       │
//! │  │  membership     │   │  qty, fragile   │   │  total          │       │
//! │  │  coupon, items  │   └─────────────────┘   │  warnings       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  Raw strings are interpreted through closed enums:                      │
//! │    category   ──► Category        (Book | Food | Electronics | Other)   │
//! │    country    ──► Country         (Th | Jp | Us | Other)                │
//! │    membership ──► MembershipTier  (Gold | Platinum | Standard)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw Input, Typed Interpretation
//! Invoices arrive from external collaborators and may be invalid, so the
//! structs keep exactly what was sent. The validator reports everything
//! wrong with them; the calculators read the typed view.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::FRAGILE_FEE_PER_UNIT;

// =============================================================================
// Rates
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 700 bps = 7% (Thailand VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Discount rate in basis points, used by membership tiers and coupons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Book,
    Food,
    Electronics,
    Other,
}

impl Category {
    /// Parses the wire name. Matching is exact: `"Book"` is not a category.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "book" => Some(Category::Book),
            "food" => Some(Category::Food),
            "electronics" => Some(Category::Electronics),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Book => "book",
            Category::Food => "food",
            Category::Electronics => "electronics",
            Category::Other => "other",
        }
    }
}

// =============================================================================
// Country
// =============================================================================

/// Shipping destination, as far as pricing is concerned.
///
/// Only Thailand, Japan and the US have their own rules; every other
/// country code shares the default tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Country {
    Th,
    Jp,
    Us,
    /// Any code outside the known set.
    Other,
}

impl Country {
    /// Interprets an ISO 3166 alpha-2 code. Exact match, unknown codes map
    /// to [`Country::Other`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "TH" => Country::Th,
            "JP" => Country::Jp,
            "US" => Country::Us,
            _ => Country::Other,
        }
    }
}

// =============================================================================
// Membership Tier
// =============================================================================

/// Customer membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Gold,
    Platinum,
    /// Everyone without a paid tier ("regular", "", anything else).
    #[default]
    Standard,
}

impl MembershipTier {
    pub fn from_name(name: &str) -> Self {
        match name {
            "gold" => MembershipTier::Gold,
            "platinum" => MembershipTier::Platinum,
            _ => MembershipTier::Standard,
        }
    }

    /// Gold and platinum are paid tiers.
    #[inline]
    pub const fn is_paid(&self) -> bool {
        matches!(self, MembershipTier::Gold | MembershipTier::Platinum)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Stock Keeping Unit. Must be non-empty.
    pub sku: String,

    /// Category wire name: book, food, electronics or other.
    pub category: String,

    /// Price per unit in cents. Must not be negative.
    ///
    /// Travels as `unit_price` on the wire, still in cents.
    #[serde(rename = "unit_price")]
    pub unit_price_cents: i64,

    /// Units ordered. Must be positive.
    pub qty: i64,

    /// Fragile items carry a per-unit handling surcharge.
    #[serde(default)]
    pub fragile: bool,
}

impl LineItem {
    /// Creates a non-fragile line item.
    pub fn new(
        sku: impl Into<String>,
        category: impl Into<String>,
        unit_price: Money,
        qty: i64,
    ) -> Self {
        LineItem {
            sku: sku.into(),
            category: category.into(),
            unit_price_cents: unit_price.cents(),
            qty,
            fragile: false,
        }
    }

    /// Marks the item fragile (or not).
    pub fn with_fragile(mut self, fragile: bool) -> Self {
        self.fragile = fragile;
        self
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// unit_price × qty, `None` if it does not fit in [`Money`].
    #[inline]
    pub fn checked_line_total(&self) -> Option<Money> {
        self.unit_price().checked_multiply_quantity(self.qty)
    }

    /// Handling surcharge for this line: 5.00 × qty when fragile, zero
    /// otherwise. `None` if it does not fit in [`Money`].
    #[inline]
    pub fn checked_fragile_surcharge(&self) -> Option<Money> {
        if self.fragile {
            FRAGILE_FEE_PER_UNIT.checked_multiply_quantity(self.qty)
        } else {
            Some(Money::zero())
        }
    }

    /// The typed category, `None` if the wire name is unknown.
    #[inline]
    pub fn category_kind(&self) -> Option<Category> {
        Category::parse(&self.category)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A customer invoice waiting to be priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    pub invoice_id: String,
    pub customer_id: String,

    /// Destination country code (free-form, e.g. "TH").
    pub country: String,

    /// Membership tier name (free-form, e.g. "gold").
    pub membership: String,

    /// Coupon code as typed by the customer; may be blank or padded.
    #[serde(default)]
    pub coupon: Option<String>,

    pub items: Vec<LineItem>,
}

impl Invoice {
    /// Creates an invoice without a coupon.
    pub fn new(
        invoice_id: impl Into<String>,
        customer_id: impl Into<String>,
        country: impl Into<String>,
        membership: impl Into<String>,
        items: Vec<LineItem>,
    ) -> Self {
        Invoice {
            invoice_id: invoice_id.into(),
            customer_id: customer_id.into(),
            country: country.into(),
            membership: membership.into(),
            coupon: None,
            items,
        }
    }

    pub fn with_coupon(mut self, coupon: impl Into<String>) -> Self {
        self.coupon = Some(coupon.into());
        self
    }

    #[inline]
    pub fn country_kind(&self) -> Country {
        Country::from_code(&self.country)
    }

    #[inline]
    pub fn membership_tier(&self) -> MembershipTier {
        MembershipTier::from_name(&self.membership)
    }

    /// The coupon code with surrounding whitespace removed, `None` when
    /// absent or blank.
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::types::Invoice;
    ///
    /// let inv = Invoice::new("INV-1", "C-1", "US", "gold", vec![]).with_coupon(" VIP20 ");
    /// assert_eq!(inv.coupon_code(), Some("VIP20"));
    ///
    /// let blank = Invoice::new("INV-1", "C-1", "US", "gold", vec![]).with_coupon("   ");
    /// assert_eq!(blank.coupon_code(), None);
    /// ```
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }
}

// =============================================================================
// Warnings
// =============================================================================

/// Non-fatal advisory returned alongside a successful total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// A coupon was given but is not in the coupon table.
    UnknownCoupon,
    /// Large order from a customer without a paid tier.
    MembershipUpgrade,
}

impl Warning {
    /// The customer-facing message.
    pub const fn message(&self) -> &'static str {
        match self {
            Warning::UnknownCoupon => "Unknown coupon",
            Warning::MembershipUpgrade => "Consider membership upgrade",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Every component of a priced invoice.
///
/// `total = max(0, subtotal + shipping + fragile_fee + tax - discount)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub fragile_fee: Money,
    pub shipping: Money,
    /// Membership plus coupon discount.
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
    /// Advisories in the order they were raised.
    pub warnings: Vec<Warning>,
}

impl PriceBreakdown {
    pub fn into_total_and_warnings(self) -> (Money, Vec<Warning>) {
        (self.total, self.warnings)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);

        let off = DiscountRate::from_bps(2000);
        assert!((off.percentage() - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_category_parse_is_exact() {
        assert_eq!(Category::parse("book"), Some(Category::Book));
        assert_eq!(Category::parse("electronics"), Some(Category::Electronics));
        assert_eq!(Category::parse("Book"), None);
        assert_eq!(Category::parse("toys"), None);
        assert_eq!(Category::Food.as_str(), "food");
    }

    #[test]
    fn test_country_from_code() {
        assert_eq!(Country::from_code("TH"), Country::Th);
        assert_eq!(Country::from_code("JP"), Country::Jp);
        assert_eq!(Country::from_code("US"), Country::Us);
        assert_eq!(Country::from_code("us"), Country::Other);
        assert_eq!(Country::from_code("DE"), Country::Other);
    }

    #[test]
    fn test_membership_tier() {
        assert_eq!(MembershipTier::from_name("gold"), MembershipTier::Gold);
        assert_eq!(MembershipTier::from_name("platinum"), MembershipTier::Platinum);
        assert_eq!(MembershipTier::from_name("regular"), MembershipTier::Standard);
        assert!(MembershipTier::Gold.is_paid());
        assert!(!MembershipTier::default().is_paid());
    }

    #[test]
    fn test_line_item_totals() {
        let item = LineItem::new("E1", "electronics", Money::from_major(10), 3).with_fragile(true);
        assert_eq!(item.checked_line_total(), Some(Money::from_major(30)));
        assert_eq!(item.checked_fragile_surcharge(), Some(Money::from_major(15)));
        assert_eq!(item.category_kind(), Some(Category::Electronics));
        assert!(item.fragile);

        let sturdy = item.with_fragile(false);
        assert_eq!(sturdy.checked_fragile_surcharge(), Some(Money::zero()));
    }

    #[test]
    fn test_line_item_totals_that_do_not_fit() {
        let pricey = LineItem::new("BIG", "book", Money::from_cents(i64::MAX / 2), 3);
        assert_eq!(pricey.checked_line_total(), None);

        let bulky = LineItem::new("BULK", "other", Money::zero(), i64::MAX / 100).with_fragile(true);
        assert_eq!(bulky.checked_line_total(), Some(Money::zero()));
        assert_eq!(bulky.checked_fragile_surcharge(), None);
    }

    #[test]
    fn test_coupon_code_trimming() {
        let inv = Invoice::new("I", "C", "TH", "gold", vec![]);
        assert_eq!(inv.coupon_code(), None);
        assert_eq!(inv.clone().with_coupon("").coupon_code(), None);
        assert_eq!(inv.with_coupon("\tWELCOME10\n").coupon_code(), Some("WELCOME10"));
    }

    #[test]
    fn test_warning_messages() {
        assert_eq!(Warning::UnknownCoupon.to_string(), "Unknown coupon");
        assert_eq!(Warning::MembershipUpgrade.to_string(), "Consider membership upgrade");
    }

    #[test]
    fn test_invoice_from_json() {
        let json = r#"{
            "invoice_id": "INV-7",
            "customer_id": "CUST-1",
            "country": "JP",
            "membership": "platinum",
            "items": [
                { "sku": "F1", "category": "food", "unit_price": 450, "qty": 4 }
            ]
        }"#;
        let inv: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(inv.coupon, None);
        assert_eq!(inv.country_kind(), Country::Jp);
        assert_eq!(inv.membership_tier(), MembershipTier::Platinum);
        assert!(!inv.items[0].fragile);
        assert_eq!(inv.items[0].unit_price_cents, 450);
        assert_eq!(inv.items[0].checked_line_total().map(|m| m.cents()), Some(1800));

        let back = serde_json::to_value(&inv.items[0]).unwrap();
        assert_eq!(back["unit_price"], 450);
    }
}
