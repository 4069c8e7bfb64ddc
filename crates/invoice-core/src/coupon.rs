//! # Coupon Table
//!
//! Maps coupon codes to discount rates.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CouponTable::default()          built-in table                        │
//! │  CouponTable::from_toml_str(..)  loaded by the host application        │
//! │  CouponTable::new().with_coupon  assembled in code (tests)             │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  InvoiceEngine::with_coupons(table)                                     │
//! │            │                                                            │
//! │            ▼                                                            │
//! │  read-only for the life of the engine, shared freely across threads    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # coupons.toml, rates in basis points (1000 = 10%)
//! [coupons]
//! WELCOME10 = 1000
//! VIP20 = 2000
//! STUDENT5 = 500
//! ```
//!
//! Codes are matched exactly (case-sensitive). Callers trim user input
//! before looking it up; the table itself never holds padded codes, nor
//! rates above 100%, whichever constructor built it.

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::types::DiscountRate;

/// Largest accepted rate, 100%.
const MAX_RATE_BPS: u32 = 10_000;

/// Built-in coupons: (code, rate in bps).
const DEFAULT_COUPONS: [(&str, u32); 3] = [("WELCOME10", 1000), ("VIP20", 2000), ("STUDENT5", 500)];

// =============================================================================
// Coupon Table
// =============================================================================

/// Immutable coupon code → discount rate mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponTable {
    rates: BTreeMap<String, DiscountRate>,
}

impl CouponTable {
    /// An empty table: every coupon is unknown.
    pub fn new() -> Self {
        CouponTable {
            rates: BTreeMap::new(),
        }
    }

    /// Builds a table from `(code, rate)` pairs. Later duplicates win.
    ///
    /// ## Errors
    /// The same code and rate checks as [`from_toml_str`](Self::from_toml_str).
    pub fn from_rates<I, S>(rates: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (S, DiscountRate)>,
        S: Into<String>,
    {
        rates
            .into_iter()
            .try_fold(CouponTable::new(), |table, (code, rate)| table.with_coupon(code, rate))
    }

    /// Adds (or replaces) one coupon.
    ///
    /// ## Errors
    /// - [`ConfigError::InvalidCode`] for blank or whitespace-padded codes
    /// - [`ConfigError::RateOutOfRange`] for rates above 10000 bps
    pub fn with_coupon(mut self, code: impl Into<String>, rate: DiscountRate) -> ConfigResult<Self> {
        let code = check_entry(code.into(), rate.bps())?;
        self.rates.insert(code, rate);
        Ok(self)
    }

    /// Loads a table from TOML.
    ///
    /// A document without a `[coupons]` section yields an empty table.
    ///
    /// ## Errors
    /// - [`ConfigError::Parse`] for malformed TOML or non-integer rates
    /// - [`ConfigError::InvalidCode`] for blank or whitespace-padded codes
    /// - [`ConfigError::RateOutOfRange`] for rates above 10000 bps
    ///
    /// ## Example
    /// ```rust
    /// use invoice_core::coupon::CouponTable;
    ///
    /// let table = CouponTable::from_toml_str("[coupons]\nSUMMER15 = 1500\n").unwrap();
    /// assert_eq!(table.rate_for("SUMMER15").map(|r| r.bps()), Some(1500));
    /// ```
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let file: CouponFile = toml::from_str(source)?;

        let table = CouponTable::from_rates(
            file.coupons
                .into_iter()
                .map(|(code, bps)| (code, DiscountRate::from_bps(bps))),
        )?;

        info!(coupons = table.len(), "Loaded coupon table");
        Ok(table)
    }

    /// Looks up an already-trimmed code.
    pub fn rate_for(&self, code: &str) -> Option<DiscountRate> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}

impl Default for CouponTable {
    /// WELCOME10 (10%), VIP20 (20%), STUDENT5 (5%).
    fn default() -> Self {
        CouponTable {
            rates: DEFAULT_COUPONS
                .iter()
                .map(|&(code, bps)| (code.to_string(), DiscountRate::from_bps(bps)))
                .collect(),
        }
    }
}

/// Every entry, however the table is built: a non-empty unpadded code and
/// a rate of at most 100%.
fn check_entry(code: String, bps: u32) -> ConfigResult<String> {
    if code.is_empty() || code.trim() != code {
        return Err(ConfigError::InvalidCode { code });
    }
    if bps > MAX_RATE_BPS {
        return Err(ConfigError::RateOutOfRange { code, bps });
    }
    Ok(code)
}

/// On-disk shape of a coupon configuration file.
#[derive(Debug, Deserialize)]
struct CouponFile {
    #[serde(default)]
    coupons: BTreeMap<String, u32>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = CouponTable::default();
        assert_eq!(table.len(), 3);
        assert_eq!(table.rate_for("WELCOME10"), Some(DiscountRate::from_bps(1000)));
        assert_eq!(table.rate_for("VIP20"), Some(DiscountRate::from_bps(2000)));
        assert_eq!(table.rate_for("STUDENT5"), Some(DiscountRate::from_bps(500)));
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["STUDENT5", "VIP20", "WELCOME10"]);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = CouponTable::default();
        assert_eq!(table.rate_for("vip20"), None);
        assert_eq!(table.rate_for(" VIP20"), None);
        assert_eq!(table.rate_for("BOGUS"), None);
    }

    #[test]
    fn test_builder() {
        let table = CouponTable::new()
            .with_coupon("HALF", DiscountRate::from_bps(5000))
            .and_then(|t| t.with_coupon("HALF", DiscountRate::from_bps(4000)))
            .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rate_for("HALF"), Some(DiscountRate::from_bps(4000)));
        assert!(CouponTable::new().is_empty());
    }

    #[test]
    fn test_builder_enforces_loader_rules() {
        assert!(matches!(
            CouponTable::new().with_coupon("TOO_MUCH", DiscountRate::from_bps(10_001)),
            Err(ConfigError::RateOutOfRange { bps: 10_001, .. })
        ));
        assert!(matches!(
            CouponTable::new().with_coupon(" VIP20", DiscountRate::from_bps(2000)),
            Err(ConfigError::InvalidCode { .. })
        ));
        assert!(CouponTable::new()
            .with_coupon("ALL", DiscountRate::from_bps(10_000))
            .is_ok());
    }

    #[test]
    fn test_from_rates() {
        let table = CouponTable::from_rates([
            ("A", DiscountRate::from_bps(100)),
            ("B", DiscountRate::from_bps(200)),
        ])
        .unwrap();
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["A", "B"]);

        let err = CouponTable::from_rates([
            ("OK", DiscountRate::from_bps(100)),
            ("BAD", DiscountRate::from_bps(50_000)),
        ])
        .unwrap_err();
        assert_eq!(err.to_string(), "Coupon BAD rate 50000 bps exceeds 10000 bps");
    }

    #[test]
    fn test_default_table_passes_its_own_checks() {
        let rebuilt = CouponTable::from_rates(
            DEFAULT_COUPONS
                .iter()
                .map(|&(code, bps)| (code, DiscountRate::from_bps(bps))),
        )
        .unwrap();
        assert_eq!(rebuilt, CouponTable::default());
    }

    #[test]
    fn test_from_toml() {
        let table = CouponTable::from_toml_str(
            r#"
            [coupons]
            WELCOME10 = 1000
            BLACKFRIDAY = 3000
            "#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rate_for("BLACKFRIDAY"), Some(DiscountRate::from_bps(3000)));
    }

    #[test]
    fn test_from_toml_without_section_is_empty() {
        assert!(CouponTable::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert!(matches!(
            CouponTable::from_toml_str("[coupons]\nTOO_MUCH = 10001\n"),
            Err(ConfigError::RateOutOfRange { bps: 10001, .. })
        ));
        assert!(matches!(
            CouponTable::from_toml_str("[coupons]\n\" PADDED \" = 100\n"),
            Err(ConfigError::InvalidCode { .. })
        ));
        assert!(matches!(
            CouponTable::from_toml_str("[coupons]\n\"\" = 100\n"),
            Err(ConfigError::InvalidCode { .. })
        ));
        assert!(matches!(
            CouponTable::from_toml_str("[coupons]\nFRACTION = 0.1\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
