//! # Invoice Engine
//!
//! Runs the pricing pipeline over a validated invoice.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Invoice ──► validate ── problems? ──► Err(ValidationError)             │
//! │                 │ ok                                                    │
//! │                 ▼                                                       │
//! │        subtotal, fragile_fee      Σ price × qty,  Σ 5.00 × fragile qty  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │             shipping              country bracket on subtotal           │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │             discount              membership + coupon  (may warn)       │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │               tax                 country rate on subtotal - discount   │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │             assemble              clamp at 0, upgrade hint  (may warn)  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │        Ok(PriceBreakdown)                                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Warnings share one list across the pipeline, so an unknown-coupon
//! warning always precedes an upgrade hint.
//!
//! ## Usage
//! ```rust
//! use invoice_core::{Invoice, InvoiceEngine, LineItem, Money};
//!
//! let engine = InvoiceEngine::new();
//! let invoice = Invoice::new(
//!     "INV-1",
//!     "CUST-1",
//!     "US",
//!     "regular",
//!     vec![LineItem::new("B1", "book", Money::from_major(100), 2)],
//! );
//!
//! let (total, warnings) = engine.compute_total(&invoice).unwrap();
//! assert_eq!(total, Money::from_major(224));
//! assert!(warnings.is_empty());
//! ```

use tracing::debug;

use crate::coupon::CouponTable;
use crate::discount::{coupon_discount, membership_discount};
use crate::error::{ValidationError, ValidationProblem, ValidationResult};
use crate::money::Money;
use crate::shipping::shipping_fee;
use crate::tax::tax_for;
use crate::types::{Invoice, LineItem, PriceBreakdown, Warning};
use crate::validation::ensure_valid;
use crate::{MAX_INVOICE_AMOUNT, UPGRADE_SUGGESTION_THRESHOLD};

// =============================================================================
// Subtotal / Fragile Fee
// =============================================================================

/// Returns `(subtotal, fragile_fee)` for already-validated items.
///
/// ## Errors
/// [`ValidationProblem::AmountTooLarge`] naming the first item that pushes
/// either sum past [`MAX_INVOICE_AMOUNT`].
///
/// ## Example
/// ```rust
/// use invoice_core::engine::subtotal_and_fragile_fee;
/// use invoice_core::{LineItem, Money};
///
/// let items = [LineItem::new("E1", "electronics", Money::from_major(10), 3).with_fragile(true)];
/// let (subtotal, fragile_fee) = subtotal_and_fragile_fee(&items).unwrap();
/// assert_eq!(subtotal, Money::from_major(30));
/// assert_eq!(fragile_fee, Money::from_major(15));
/// ```
pub fn subtotal_and_fragile_fee(items: &[LineItem]) -> Result<(Money, Money), ValidationProblem> {
    items
        .iter()
        .try_fold((Money::zero(), Money::zero()), accumulate_item)
}

/// Adds one item to the running `(subtotal, fragile_fee)`.
pub(crate) fn accumulate_item(
    (subtotal, fragile_fee): (Money, Money),
    item: &LineItem,
) -> Result<(Money, Money), ValidationProblem> {
    let within_cap = |amount: Money| Some(amount).filter(|a| *a <= MAX_INVOICE_AMOUNT);

    let subtotal = item
        .checked_line_total()
        .and_then(|line| subtotal.checked_add(line))
        .and_then(within_cap);
    let fragile_fee = item
        .checked_fragile_surcharge()
        .and_then(|surcharge| fragile_fee.checked_add(surcharge))
        .and_then(within_cap);

    match (subtotal, fragile_fee) {
        (Some(subtotal), Some(fragile_fee)) => Ok((subtotal, fragile_fee)),
        _ => Err(ValidationProblem::AmountTooLarge {
            sku: item.sku.clone(),
        }),
    }
}

// =============================================================================
// Invoice Engine
// =============================================================================

/// Prices invoices against an immutable coupon table.
///
/// Holds no mutable state; one engine can serve any number of threads
/// through a shared reference.
#[derive(Debug, Clone, Default)]
pub struct InvoiceEngine {
    coupons: CouponTable,
}

impl InvoiceEngine {
    /// Engine with the built-in coupon table.
    pub fn new() -> Self {
        InvoiceEngine::default()
    }

    /// Engine with an injected coupon table.
    pub fn with_coupons(coupons: CouponTable) -> Self {
        InvoiceEngine { coupons }
    }

    pub fn coupons(&self) -> &CouponTable {
        &self.coupons
    }

    /// Computes the payable total and any advisory warnings.
    ///
    /// Accepts `&Invoice` or `Option<&Invoice>`; `None` fails with
    /// "Invoice is missing".
    ///
    /// ## Errors
    /// [`ValidationError`] with every problem found, when the invoice is
    /// invalid. Nothing is computed in that case.
    pub fn compute_total<'a>(
        &self,
        invoice: impl Into<Option<&'a Invoice>>,
    ) -> ValidationResult<(Money, Vec<Warning>)> {
        self.price(invoice)
            .map(PriceBreakdown::into_total_and_warnings)
    }

    /// Like [`compute_total`](Self::compute_total), returning every
    /// component of the total.
    pub fn price<'a>(
        &self,
        invoice: impl Into<Option<&'a Invoice>>,
    ) -> ValidationResult<PriceBreakdown> {
        let invoice = invoice.into();

        let invoice = ensure_valid(invoice).map_err(|err| {
            debug!(
                invoice_id = invoice.map(|inv| inv.invoice_id.as_str()).unwrap_or_default(),
                problems = err.problems().len(),
                "Invoice failed validation"
            );
            err
        })?;

        let breakdown = self.price_valid(invoice)?;

        debug!(
            invoice_id = %invoice.invoice_id,
            subtotal = %breakdown.subtotal,
            shipping = %breakdown.shipping,
            discount = %breakdown.discount,
            tax = %breakdown.tax,
            total = %breakdown.total,
            warnings = breakdown.warnings.len(),
            "Priced invoice"
        );

        Ok(breakdown)
    }

    /// The pipeline proper. `invoice` must already be valid, so the
    /// subtotal error path is only reachable if the items change between
    /// validation and pricing.
    fn price_valid(&self, invoice: &Invoice) -> ValidationResult<PriceBreakdown> {
        let mut warnings = Vec::new();
        let country = invoice.country_kind();
        let tier = invoice.membership_tier();

        let (subtotal, fragile_fee) = subtotal_and_fragile_fee(&invoice.items)
            .map_err(|problem| ValidationError::new(vec![problem]))?;
        let shipping = shipping_fee(country, subtotal);

        let discount = membership_discount(tier, subtotal)
            + coupon_discount(
                &self.coupons,
                invoice.coupon.as_deref(),
                subtotal,
                &mut warnings,
            );

        let tax = tax_for(country, subtotal, discount);

        let total = (subtotal + shipping + fragile_fee + tax - discount).clamp_non_negative();

        if subtotal > UPGRADE_SUGGESTION_THRESHOLD && !tier.is_paid() {
            warnings.push(Warning::MembershipUpgrade);
        }

        Ok(PriceBreakdown {
            subtotal,
            fragile_fee,
            shipping,
            discount,
            tax,
            total,
            warnings,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
