//! # Error Types
//!
//! Domain-specific error types for invoice-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Pricing (InvoiceEngine::compute_total / price)                         │
//! │  └── ValidationError    - every ValidationProblem found on the invoice  │
//! │       └── ValidationProblem - one failed check                          │
//! │                                                                         │
//! │  Configuration (CouponTable::from_toml_str)                             │
//! │  └── ConfigError        - malformed coupon table                        │
//! │                                                                         │
//! │  Unknown coupons / upgrade hints are Warnings, NOT errors               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, coupon code, etc.)
//! 3. Errors are enum variants, never String
//! 4. Validation collects every problem, it never stops at the first one

use thiserror::Error;

// =============================================================================
// Validation Problem
// =============================================================================

/// A single failed invoice check.
///
/// The `Display` output is the message handed back to callers, so the
/// wording here is part of the public contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationProblem {
    /// No invoice was supplied at all.
    #[error("Invoice is missing")]
    MissingInvoice,

    #[error("Missing invoice_id")]
    MissingInvoiceId,

    #[error("Missing customer_id")]
    MissingCustomerId,

    /// The invoice has no line items.
    #[error("Invoice must contain items")]
    NoItems,

    #[error("Item sku is missing")]
    MissingSku,

    /// Quantity is zero or negative.
    #[error("Invalid qty for {sku}")]
    InvalidQuantity { sku: String },

    /// Unit price is negative.
    #[error("Invalid price for {sku}")]
    InvalidPrice { sku: String },

    /// Category is not one of book, food, electronics, other.
    #[error("Unknown category for {sku}")]
    UnknownCategory { sku: String },

    /// The line total or fragile surcharge of this item, or the running
    /// invoice sums once it is added, exceed `MAX_INVOICE_AMOUNT`.
    #[error("Amount too large for {sku}")]
    AmountTooLarge { sku: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Invoice failed validation.
///
/// Carries every problem in the order the checks found them. Displays as
/// the problem messages joined by `"; "`.
///
/// ## User Workflow
/// ```text
/// compute_total(invoice)
///      │
///      ▼
/// validate_invoice → [MissingCustomerId, InvalidQuantity { sku: "B1" }]
///      │
///      ▼
/// Err(ValidationError) → "Missing customer_id; Invalid qty for B1"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_problems(.problems))]
pub struct ValidationError {
    problems: Vec<ValidationProblem>,
}

impl ValidationError {
    /// Wraps a list of problems.
    pub fn new(problems: Vec<ValidationProblem>) -> Self {
        ValidationError { problems }
    }

    /// The individual problems, in check order.
    pub fn problems(&self) -> &[ValidationProblem] {
        &self.problems
    }

    /// The problem messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.problems.iter().map(ToString::to_string).collect()
    }
}

fn join_problems(problems: &[ValidationProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Config Error
// =============================================================================

/// Coupon table configuration errors.
///
/// Only raised while loading configuration, never while pricing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the expected shape.
    #[error("Invalid coupon configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A coupon code is empty or carries surrounding whitespace.
    #[error("Invalid coupon code '{code}'")]
    InvalidCode { code: String },

    /// A rate is above 100% (10000 bps).
    #[error("Coupon {code} rate {bps} bps exceeds 10000 bps")]
    RateOutOfRange { code: String, bps: u32 },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of pricing an invoice.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result of loading configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_messages() {
        assert_eq!(ValidationProblem::MissingInvoice.to_string(), "Invoice is missing");
        assert_eq!(ValidationProblem::NoItems.to_string(), "Invoice must contain items");
        let err = ValidationProblem::InvalidQuantity {
            sku: "B1".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid qty for B1");
    }

    #[test]
    fn test_validation_error_joins_problems() {
        let err = ValidationError::new(vec![
            ValidationProblem::MissingInvoiceId,
            ValidationProblem::UnknownCategory {
                sku: "X9".to_string(),
            },
        ]);
        assert_eq!(err.to_string(), "Missing invoice_id; Unknown category for X9");
        assert_eq!(err.problems().len(), 2);
        assert_eq!(
            err.messages(),
            vec!["Missing invoice_id".to_string(), "Unknown category for X9".to_string()]
        );
    }

    #[test]
    fn test_single_problem_has_no_separator() {
        let err = ValidationError::new(vec![ValidationProblem::MissingSku]);
        assert_eq!(err.to_string(), "Item sku is missing");
    }

    #[test]
    fn test_amount_too_large_names_the_sku() {
        let err = ValidationError::new(vec![ValidationProblem::AmountTooLarge {
            sku: "BIG".to_string(),
        }]);
        assert_eq!(err.to_string(), "Amount too large for BIG");
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::RateOutOfRange {
            code: "HALF".to_string(),
            bps: 12000,
        };
        assert_eq!(err.to_string(), "Coupon HALF rate 12000 bps exceeds 10000 bps");
    }
}
