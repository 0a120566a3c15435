use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One row of the point-of-sale product table. Immutable after ingestion;
/// grouped into allocation pools keyed by `(customer_mobile, model)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub customer_mobile: String,
    /// May be empty when the original row had no model.
    pub model: String,
    /// Uppercased during ingestion.
    pub category: String,
    pub brand: String,
    pub invoice_number: String,
    /// `None` when the original cell was not parseable as a number.
    pub item_rate: Option<f64>,
    pub imei: String,
}

/// One row of the warranty/plan-sale table. The three named fields drive
/// reconciliation; every other input column rides along in `extra` keyed by
/// its original header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsgRecord {
    pub customer_mobile: String,
    pub retailer_sku: String,
    /// Invoice of the plan sale itself, distinct from the matched product's.
    pub invoice_number: String,
    pub extra: BTreeMap<String, String>,
}

impl OsgRecord {
    /// Pass-through column lookup, empty string when absent.
    pub fn field(&self, header: &str) -> &str {
        self.extra.get(header).map(String::as_str).unwrap_or("")
    }
}

/// Price bounds recovered from a "Slab : <N>K-<M>K" SKU fragment, already
/// scaled to whole rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSlab {
    pub min: u32,
    pub max: u32,
}

impl PriceSlab {
    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min as f64 && rate <= self.max as f64
    }
}

/// The plan-duration component of a warranty term. Usually whole years, but
/// spill-and-drop SKUs encode a composite protection+warranty term that stays
/// a formatted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationTerm {
    Years(u32),
    Composite(String),
}

impl fmt::Display for DurationTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationTerm::Years(y) => write!(f, "{}", y),
            DurationTerm::Composite(s) => write!(f, "{}", s),
        }
    }
}

/// Warranty terms parsed out of a retailer SKU. Absence of a parseable term
/// is represented by `Option<WarrantyTerms>` at the call site, a state
/// distinct from a zero duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantyTerms {
    pub manufacturer_years: u32,
    pub duration: DurationTerm,
}

/// Grouping key for the allocation pools. Ordered so pool iteration is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolKey {
    pub customer_mobile: String,
    pub model: String,
}

impl PoolKey {
    pub fn new(customer_mobile: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            customer_mobile: customer_mobile.into(),
            model: model.into(),
        }
    }
}

/// Numeric cell parser with fallback: unparseable input becomes `None`,
/// never zero.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_fallback() {
        assert_eq!(parse_number("1500"), Some(1500.0));
        assert_eq!(parse_number(" 12999.50 "), Some(12999.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
    }

    #[test]
    fn test_price_slab_inclusive_bounds() {
        let slab = PriceSlab {
            min: 10000,
            max: 20000,
        };
        assert!(slab.contains(10000.0));
        assert!(slab.contains(20000.0));
        assert!(!slab.contains(9999.99));
        assert!(!slab.contains(20000.01));
    }

    #[test]
    fn test_duration_term_display() {
        assert_eq!(DurationTerm::Years(3).to_string(), "3");
        assert_eq!(
            DurationTerm::Composite("4P+3W".to_string()).to_string(),
            "4P+3W"
        );
    }
}
