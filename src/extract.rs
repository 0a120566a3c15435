//! Regex extraction of structured sub-strings from SKU and invoice text:
//! price slabs, warranty durations, and store codes.

use crate::schema::{DurationTerm, PriceSlab, WarrantyTerms};
use once_cell::sync::Lazy;
use regex::Regex;

static SLAB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i:Slab)\s*:\s*(\d+)K-(\d+)K").unwrap());

static DUR_PLUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Dur\s*:\s*(\d+)\+(\d+)").unwrap());
static SDP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\+(\d+)\s*SDP-(\d+)").unwrap());
static DUR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Dur\s*:\s*(\d+)").unwrap());
static BARE_PLUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\+(\d+)").unwrap());

static STORE_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]{2,})\b").unwrap());

/// Recovers "Slab : <N>K-<M>K" price bounds from SKU text, scaled to whole
/// rupees. The label is matched case-insensitively with flexible spacing
/// around the colon.
pub fn price_slab(text: &str) -> Option<PriceSlab> {
    let caps = SLAB_RE.captures(text)?;
    let min: u32 = caps[1].parse().ok()?;
    let max: u32 = caps[2].parse().ok()?;
    // SKU text is free-form; bounds too large to scale degrade to no-slab
    // like any other unparseable field.
    Some(PriceSlab {
        min: min.checked_mul(1000)?,
        max: max.checked_mul(1000)?,
    })
}

/// Parses manufacturer-warranty and plan-duration terms out of SKU text.
///
/// Four patterns are tried in fixed priority order, first match wins:
/// 1. `Dur : <A>+<B>` — A years manufacturer, B years plan.
/// 2. `<A>+<B> SDP-<C>` — spill-and-drop plans; the duration becomes the
///    composite term `<C>P+<B>W`.
/// 3. `Dur : <A>` — manufacturer warranty defaults to one year.
/// 4. bare `<A>+<B>`.
///
/// Returns `None` when nothing matches; unknown is not zero.
pub fn warranty_duration(text: &str) -> Option<WarrantyTerms> {
    if let Some(caps) = DUR_PLUS_RE.captures(text) {
        return Some(WarrantyTerms {
            manufacturer_years: caps[1].parse().ok()?,
            duration: DurationTerm::Years(caps[2].parse().ok()?),
        });
    }
    if let Some(caps) = SDP_RE.captures(text) {
        return Some(WarrantyTerms {
            manufacturer_years: caps[1].parse().ok()?,
            duration: DurationTerm::Composite(format!("{}P+{}W", &caps[3], &caps[2])),
        });
    }
    if let Some(caps) = DUR_RE.captures(text) {
        return Some(WarrantyTerms {
            manufacturer_years: 1,
            duration: DurationTerm::Years(caps[1].parse().ok()?),
        });
    }
    if let Some(caps) = BARE_PLUS_RE.captures(text) {
        return Some(WarrantyTerms {
            manufacturer_years: caps[1].parse().ok()?,
            duration: DurationTerm::Years(caps[2].parse().ok()?),
        });
    }
    None
}

/// Extracts the store code from a product invoice number: the first
/// word-bounded run of two or more consecutive uppercase letters, empty
/// string when none exists.
pub fn store_code(invoice_number: &str) -> String {
    STORE_CODE_RE
        .captures(invoice_number)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_slab_match() {
        assert_eq!(
            price_slab("Slab : 10K-20K"),
            Some(PriceSlab {
                min: 10000,
                max: 20000
            })
        );
        assert_eq!(
            price_slab("EW : TV : slab:5K-15K : Dur : 1+1"),
            Some(PriceSlab {
                min: 5000,
                max: 15000
            })
        );
    }

    #[test]
    fn test_price_slab_no_match() {
        assert_eq!(price_slab("none"), None);
        assert_eq!(price_slab("Slab : 10-20"), None);
    }

    #[test]
    fn test_price_slab_oversized_bounds_degrade_to_none() {
        assert_eq!(
            price_slab("HAEW : Warranty : TV : Slab : 5000000K-6000000K"),
            None
        );
        assert_eq!(price_slab("Slab : 99999999999999999999K-1K"), None);
    }

    #[test]
    fn test_warranty_duration_dur_with_plus() {
        assert_eq!(
            warranty_duration("Dur : 1+2"),
            Some(WarrantyTerms {
                manufacturer_years: 1,
                duration: DurationTerm::Years(2),
            })
        );
    }

    #[test]
    fn test_warranty_duration_sdp_composite() {
        assert_eq!(
            warranty_duration("2+3 SDP-4"),
            Some(WarrantyTerms {
                manufacturer_years: 2,
                duration: DurationTerm::Composite("4P+3W".to_string()),
            })
        );
    }

    #[test]
    fn test_warranty_duration_dur_single() {
        assert_eq!(
            warranty_duration("Dur : 5"),
            Some(WarrantyTerms {
                manufacturer_years: 1,
                duration: DurationTerm::Years(5),
            })
        );
    }

    #[test]
    fn test_warranty_duration_bare_plus() {
        assert_eq!(
            warranty_duration("7+8"),
            Some(WarrantyTerms {
                manufacturer_years: 7,
                duration: DurationTerm::Years(8),
            })
        );
    }

    #[test]
    fn test_warranty_duration_no_match() {
        assert_eq!(warranty_duration("no match"), None);
    }

    #[test]
    fn test_warranty_duration_priority_order() {
        // "Dur : 1+2" also contains a bare "1+2"; the labelled pattern must
        // win over the bare one.
        let terms = warranty_duration("TV : Slab : 10K-20K : Dur : 1+2").unwrap();
        assert_eq!(terms.manufacturer_years, 1);
        assert_eq!(terms.duration, DurationTerm::Years(2));
    }

    #[test]
    fn test_store_code_extraction() {
        assert_eq!(store_code("SI/BLR/1234"), "SI");
        assert_eq!(store_code("2024-MUM-00881"), "MUM");
        assert_eq!(store_code("12345"), "");
        assert_eq!(store_code(""), "");
    }
}
