//! # Validation Module
//!
//! Structural and business-rule checks run before an invoice is priced.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Validation                                   │
//! │                                                                         │
//! │  invoice present?  ── no ──► [MissingInvoice]  (stop here)              │
//! │        │ yes                                                            │
//! │        ▼                                                                │
//! │  invoice_id, customer_id, items non-empty                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  for each item, in order:                                               │
//! │    sku non-empty, qty > 0, unit_price >= 0, known category              │
//! │    running subtotal / fragile fee stay within MAX_INVOICE_AMOUNT        │
//! │                                                                         │
//! │  Every failing check is recorded. Nothing short-circuits, so the        │
//! │  caller gets the whole list in one round trip.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoice_core::types::Invoice;
//! use invoice_core::validation::validate_invoice;
//!
//! let inv = Invoice::new("INV-1", "", "US", "gold", vec![]);
//! let problems = validate_invoice(Some(&inv));
//! assert_eq!(problems.len(), 2); // customer_id and items
//! ```

use crate::engine::accumulate_item;
use crate::error::{ValidationError, ValidationProblem, ValidationResult};
use crate::money::Money;
use crate::types::{Invoice, LineItem};

// =============================================================================
// Invoice Validators
// =============================================================================

/// Collects every problem with the invoice. Empty means valid.
///
/// `None` yields the single problem [`ValidationProblem::MissingInvoice`].
pub fn validate_invoice(invoice: Option<&Invoice>) -> Vec<ValidationProblem> {
    let Some(invoice) = invoice else {
        return vec![ValidationProblem::MissingInvoice];
    };

    let mut problems = Vec::new();

    if invoice.invoice_id.is_empty() {
        problems.push(ValidationProblem::MissingInvoiceId);
    }
    if invoice.customer_id.is_empty() {
        problems.push(ValidationProblem::MissingCustomerId);
    }
    if invoice.items.is_empty() {
        problems.push(ValidationProblem::NoItems);
    }

    // Only well-formed items count towards the sums. `None` once the
    // oversize problem has been reported.
    let mut totals = Some((Money::zero(), Money::zero()));

    for item in &invoice.items {
        let before = problems.len();
        validate_line_item(item, &mut problems);
        if problems.len() > before {
            continue;
        }

        if let Some(sums) = totals {
            totals = match accumulate_item(sums, item) {
                Ok(sums) => Some(sums),
                Err(problem) => {
                    problems.push(problem);
                    None
                }
            };
        }
    }

    problems
}

/// Like [`validate_invoice`], but as a `Result` for `?` chains.
pub fn ensure_valid(invoice: Option<&Invoice>) -> ValidationResult<&Invoice> {
    let problems = validate_invoice(invoice);
    match invoice {
        Some(invoice) if problems.is_empty() => Ok(invoice),
        _ => Err(ValidationError::new(problems)),
    }
}

// =============================================================================
// Line Item Validators
// =============================================================================

/// Appends the problems of one line item.
///
/// Problems after the sku check name the item by its sku, even when the
/// sku itself is empty.
fn validate_line_item(item: &LineItem, problems: &mut Vec<ValidationProblem>) {
    if item.sku.is_empty() {
        problems.push(ValidationProblem::MissingSku);
    }

    if item.qty <= 0 {
        problems.push(ValidationProblem::InvalidQuantity {
            sku: item.sku.clone(),
        });
    }

    if item.unit_price_cents < 0 {
        problems.push(ValidationProblem::InvalidPrice {
            sku: item.sku.clone(),
        });
    }

    if item.category_kind().is_none() {
        problems.push(ValidationProblem::UnknownCategory {
            sku: item.sku.clone(),
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
