//! # OSG Report Builder
//!
//! A library for reconciling warranty/protection-plan sale records ("OSG"
//! records) against point-of-sale product records and producing a formatted
//! 30-column report.
//!
//! ## Core Concepts
//!
//! - **Product records**: one row per physical product sale, keyed by
//!   customer mobile number; immutable once ingested
//! - **OSG records**: one row per plan sale, carrying a free-text retailer
//!   SKU that encodes product category, price slab, and warranty duration
//! - **Candidate resolution**: a cascade of disambiguation filters that
//!   narrows a customer's purchases to the single product a plan belongs to,
//!   or leaves the record unresolved rather than guessing
//! - **Allocation pools**: per `(customer, model)` pools that hand out each
//!   product unit's invoice number, item rate, and IMEI exactly once, in
//!   original row order
//! - **Validation flags**: rows with missing critical fields are flagged for
//!   highlighting, never dropped; only structural input defects abort a run
//!
//! ## Example
//!
//! ```rust,ignore
//! use osg_report_builder::*;
//!
//! let product_table = RawTable::new(product_headers, product_rows);
//! let osg_table = RawTable::new(osg_headers, osg_rows);
//!
//! let report = map_osg_products(&product_table, &osg_table).unwrap();
//! for row in &report.rows {
//!     if row.needs_attention {
//!         // highlight in the rendered spreadsheet
//!     }
//! }
//! ```

pub mod classify;
pub mod error;
pub mod extract;
pub mod ingestion;
pub mod pool;
pub mod report;
pub mod resolve;
pub mod schema;
pub mod summary;

pub use classify::{classify_sku, CategoryRule, CATEGORY_RULES};
pub use error::{MappingError, Result};
pub use extract::{price_slab, store_code, warranty_duration};
pub use ingestion::*;
pub use pool::AllocationPools;
pub use report::{needs_attention, MappedRow, ReportRow, ReportTable, FINAL_COLUMNS};
pub use resolve::{category_brand, resolve_model};
pub use schema::*;
pub use summary::*;

use log::{debug, info};

pub struct OsgProductMapper;

impl OsgProductMapper {
    /// Runs the full reconciliation pipeline over one pair of input tables.
    ///
    /// Per-row problems (no matching customer, unresolved ambiguity,
    /// exhausted pools, unparseable numbers) surface as empty cells and the
    /// highlight flag. Only structural defects in the inputs return an error.
    pub fn process(product_table: &RawTable, osg_table: &RawTable) -> Result<ReportTable> {
        let products = ingestion::product_records(product_table)?;
        let osg_records = ingestion::osg_records(osg_table)?;

        info!(
            "Mapping {} OSG records against {} product records",
            osg_records.len(),
            products.len()
        );

        let mapped = Self::map_records(&products, &osg_records);

        let flagged = mapped.iter().filter(|row| needs_attention(row)).count();
        if flagged > 0 {
            debug!("{} of {} rows flagged for attention", flagged, mapped.len());
        }

        Ok(ReportTable::from_mapped(&mapped))
    }

    /// The core transformation over already-typed records. Allocation is
    /// stateful and order-dependent, so OSG records are processed strictly
    /// in table row order.
    pub fn map_records(products: &[ProductRecord], osg_records: &[OsgRecord]) -> Vec<MappedRow> {
        let mut pools = AllocationPools::build(products);

        osg_records
            .iter()
            .map(|osg| {
                let model = resolve_model(osg, products);
                let (category, brand) = category_brand(&osg.customer_mobile, &model, products)
                    .map(|(c, b)| (c.to_string(), b.to_string()))
                    .unwrap_or_default();

                let key = PoolKey::new(osg.customer_mobile.clone(), model.clone());
                let product_invoice_number = pools.next_invoice(&key).unwrap_or_default();
                let item_rate = pools.next_item_rate(&key).flatten();
                let imei = pools.next_imei(&key).unwrap_or_default();

                MappedRow {
                    store_code: extract::store_code(&product_invoice_number),
                    warranty: extract::warranty_duration(&osg.retailer_sku),
                    osg: osg.clone(),
                    model,
                    category,
                    brand,
                    product_invoice_number,
                    item_rate,
                    imei,
                }
            })
            .collect()
    }
}

/// Convenience wrapper around [`OsgProductMapper::process`].
pub fn map_osg_products(product_table: &RawTable, osg_table: &RawTable) -> Result<ReportTable> {
    OsgProductMapper::process(product_table, osg_table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn product(mobile: &str, model: &str, category: &str, invoice: &str, imei: &str) -> ProductRecord {
        ProductRecord {
            customer_mobile: mobile.to_string(),
            model: model.to_string(),
            category: category.to_string(),
            brand: "ACME".to_string(),
            invoice_number: invoice.to_string(),
            item_rate: Some(15000.0),
            imei: imei.to_string(),
        }
    }

    fn osg(mobile: &str, sku: &str) -> OsgRecord {
        let mut extra = BTreeMap::new();
        extra.insert("Plan Price".to_string(), "999".to_string());
        OsgRecord {
            customer_mobile: mobile.to_string(),
            retailer_sku: sku.to_string(),
            invoice_number: "OSG-1".to_string(),
            extra,
        }
    }

    #[test]
    fn test_map_records_resolves_and_allocates() {
        let products = vec![
            product("9000000001", "X", "TV", "SI/1001", "111"),
            product("9000000001", "Y", "FAN", "SI/1002", "222"),
        ];
        let records = vec![osg("9000000001", "HAEW : Warranty : TV : Dur : 1+2")];

        let mapped = OsgProductMapper::map_records(&products, &records);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].model, "X");
        assert_eq!(mapped[0].category, "TV");
        assert_eq!(mapped[0].brand, "ACME");
        assert_eq!(mapped[0].product_invoice_number, "SI/1001");
        assert_eq!(mapped[0].imei, "111");
        assert_eq!(mapped[0].store_code, "SI");
        assert_eq!(
            mapped[0].warranty,
            Some(WarrantyTerms {
                manufacturer_years: 1,
                duration: DurationTerm::Years(2),
            })
        );
        assert!(!needs_attention(&mapped[0]));
    }

    #[test]
    fn test_duplicate_units_allocate_in_order_then_run_dry() {
        let products = vec![
            product("9000000001", "X", "TV", "SI/1001", "111"),
            product("9000000001", "X", "TV", "SI/1002", "222"),
        ];
        let records = vec![
            osg("9000000001", "HAEW : Warranty : TV"),
            osg("9000000001", "HAEW : Warranty : TV"),
            osg("9000000001", "HAEW : Warranty : TV"),
        ];

        let mapped = OsgProductMapper::map_records(&products, &records);
        assert_eq!(mapped[0].product_invoice_number, "SI/1001");
        assert_eq!(mapped[0].imei, "111");
        assert_eq!(mapped[1].product_invoice_number, "SI/1002");
        assert_eq!(mapped[1].imei, "222");
        // Third plan for a two-unit pool: empty allocation, flagged row.
        assert_eq!(mapped[2].product_invoice_number, "");
        assert_eq!(mapped[2].imei, "");
        assert_eq!(mapped[2].item_rate, None);
        assert!(needs_attention(&mapped[2]));
    }

    #[test]
    fn test_unmatched_customer_yields_flagged_empty_row() {
        let products = vec![product("9000000001", "X", "TV", "SI/1001", "111")];
        let records = vec![osg("9999999999", "HAEW : Warranty : TV")];

        let mapped = OsgProductMapper::map_records(&products, &records);
        assert_eq!(mapped[0].model, "");
        assert_eq!(mapped[0].category, "");
        assert_eq!(mapped[0].product_invoice_number, "");
        assert!(needs_attention(&mapped[0]));
    }

    #[test]
    fn test_process_end_to_end() {
        let product_table = RawTable::new(
            vec![
                "Customer Mobile".to_string(),
                "Model".to_string(),
                "Category".to_string(),
                "Invoice Number".to_string(),
                "Item Rate".to_string(),
                "IMEI".to_string(),
                "Brand".to_string(),
            ],
            vec![vec![
                "9000000001".to_string(),
                "X".to_string(),
                "TV".to_string(),
                "SI/1001".to_string(),
                "15000".to_string(),
                "111".to_string(),
                "ACME".to_string(),
            ]],
        );
        let osg_table = RawTable::new(
            vec![
                "Customer Mobile".to_string(),
                "Retailer SKU".to_string(),
                "Invoice Number".to_string(),
                "Plan Price".to_string(),
            ],
            vec![vec![
                "9000000001".to_string(),
                "HAEW : Warranty : TV : Dur : 1+2".to_string(),
                "OSG-1".to_string(),
                "999".to_string(),
            ]],
        );

        let report = map_osg_products(&product_table, &osg_table).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].cells.len(), FINAL_COLUMNS.len());
        assert!(!report.rows[0].needs_attention);
    }

    #[test]
    fn test_process_rejects_missing_columns() {
        let product_table = RawTable::new(
            vec!["Customer Mobile".to_string()],
            vec![vec!["9000000001".to_string()]],
        );
        let osg_table = RawTable::new(
            vec![
                "Customer Mobile".to_string(),
                "Retailer SKU".to_string(),
                "Invoice Number".to_string(),
            ],
            vec![vec![
                "9000000001".to_string(),
                "sku".to_string(),
                "OSG-1".to_string(),
            ]],
        );
        assert!(map_osg_products(&product_table, &osg_table).is_err());
    }
}
