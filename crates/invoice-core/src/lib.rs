//! # invoice-core: Pure Invoice Pricing for Tally
//!
//! This crate turns a customer invoice into a payable total. It contains
//! all pricing rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Callers (checkout, billing jobs, config loaders)         │   │
//! │  │   supply Invoice values, consume (total, warnings) or errors    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ invoice-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌──────────┐ ┌──────┐ ┌────────┐ │   │
//! │  │   │ validation │ │ shipping │ │ discount │ │ tax  │ │ engine │ │   │
//! │  │   └────────────┘ └──────────┘ └──────────┘ └──────┘ └────────┘ │   │
//! │  │   ┌────────────┐ ┌──────────┐ ┌──────────┐ ┌──────┐            │   │
//! │  │   │   types    │ │  money   │ │  coupon  │ │ error│            │   │
//! │  │   └────────────┘ └──────────┘ └──────────┘ └──────┘            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Invoice, LineItem, rates, warnings, price breakdown
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation and configuration errors
//! - [`validation`] - Invoice checks, all problems collected
//! - [`coupon`] - Coupon code → discount rate table
//! - [`shipping`], [`discount`], [`tax`] - One rule table each
//! - [`engine`] - Subtotal, total assembly and the [`InvoiceEngine`] entry point
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same invoice + same coupon table = same result
//! 2. **No I/O**: configuration arrives as a string or a value, never a path
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Explicit Errors**: every validation problem is a typed variant
//!
//! ## Example Usage
//!
//! ```rust
//! use invoice_core::{Invoice, InvoiceEngine, LineItem, Money};
//!
//! let engine = InvoiceEngine::new();
//! let invoice = Invoice::new(
//!     "INV-3",
//!     "CUST-9",
//!     "TH",
//!     "regular",
//!     vec![LineItem::new("F1", "food", Money::from_major(250), 4)],
//! )
//! .with_coupon("WELCOME10");
//!
//! let (total, warnings) = engine.compute_total(&invoice).unwrap();
//! assert_eq!(total, Money::from_major(963));
//! assert!(warnings.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod discount;
pub mod engine;
pub mod error;
pub mod money;
pub mod shipping;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use coupon::CouponTable;
pub use engine::InvoiceEngine;
pub use error::{ConfigError, ValidationError, ValidationProblem};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Handling surcharge per unit of a fragile line item.
pub const FRAGILE_FEE_PER_UNIT: Money = Money::from_major(5);

/// Customers without a paid tier are nudged to upgrade strictly above
/// this subtotal.
pub const UPGRADE_SUGGESTION_THRESHOLD: Money = Money::from_major(10_000);

/// Ceiling for an invoice's subtotal and for its fragile fee
/// (10 trillion major units).
///
/// Invoices above it fail validation, which leaves every later step
/// (discounts, tax, assembly) well inside the i64 cent range.
pub const MAX_INVOICE_AMOUNT: Money = Money::from_major(10_000_000_000_000);
