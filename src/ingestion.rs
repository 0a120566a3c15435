//! Converts raw column-addressed tables (the spreadsheet collaborator's
//! output) into typed records, with structural validation up front: a missing
//! required column or an empty table aborts the run before any row is
//! emitted. Everything else degrades to per-row data.

use crate::error::{MappingError, Result};
use crate::schema::{parse_number, OsgRecord, ProductRecord};
use crate::summary::{StoreAssignment, StoreSale};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

pub const COL_CUSTOMER_MOBILE: &str = "Customer Mobile";
pub const COL_MODEL: &str = "Model";
pub const COL_CATEGORY: &str = "Category";
pub const COL_INVOICE_NUMBER: &str = "Invoice Number";
pub const COL_ITEM_RATE: &str = "Item Rate";
pub const COL_IMEI: &str = "IMEI";
pub const COL_BRAND: &str = "Brand";
pub const COL_RETAILER_SKU: &str = "Retailer SKU";

/// A parsed-but-untyped table: header names plus string cells. Rows shorter
/// than the header are padded with empty cells on access.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require_column(&self, table_name: &str, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| MappingError::MissingColumn {
                table: table_name.to_string(),
                column: column.to_string(),
            })
    }

    fn require_rows(&self, table_name: &str) -> Result<()> {
        if self.rows.is_empty() {
            return Err(MappingError::EmptyTable(table_name.to_string()));
        }
        Ok(())
    }

    fn cell<'a>(&self, row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Typed product records: strings trimmed, category uppercased, item rate
/// parsed with fallback to `None`.
pub fn product_records(table: &RawTable) -> Result<Vec<ProductRecord>> {
    table.require_rows("product")?;

    let mobile = table.require_column("product", COL_CUSTOMER_MOBILE)?;
    let model = table.require_column("product", COL_MODEL)?;
    let category = table.require_column("product", COL_CATEGORY)?;
    let invoice = table.require_column("product", COL_INVOICE_NUMBER)?;
    let item_rate = table.require_column("product", COL_ITEM_RATE)?;
    let imei = table.require_column("product", COL_IMEI)?;
    let brand = table.require_column("product", COL_BRAND)?;

    let records = table
        .rows
        .iter()
        .map(|row| ProductRecord {
            customer_mobile: table.cell(row, mobile).trim().to_string(),
            model: table.cell(row, model).trim().to_string(),
            category: table.cell(row, category).trim().to_uppercase(),
            brand: table.cell(row, brand).trim().to_string(),
            invoice_number: table.cell(row, invoice).trim().to_string(),
            item_rate: parse_number(table.cell(row, item_rate)),
            imei: table.cell(row, imei).trim().to_string(),
        })
        .collect();
    Ok(records)
}

/// Typed plan-sale records. Only the three reconciliation columns are
/// required; every other column is carried through by header name.
pub fn osg_records(table: &RawTable) -> Result<Vec<OsgRecord>> {
    table.require_rows("OSG")?;

    let mobile = table.require_column("OSG", COL_CUSTOMER_MOBILE)?;
    let sku = table.require_column("OSG", COL_RETAILER_SKU)?;
    let invoice = table.require_column("OSG", COL_INVOICE_NUMBER)?;

    let records = table
        .rows
        .iter()
        .map(|row| {
            let mut extra = BTreeMap::new();
            for (idx, header) in table.headers.iter().enumerate() {
                if idx == mobile || idx == sku || idx == invoice {
                    continue;
                }
                extra.insert(header.clone(), table.cell(row, idx).trim().to_string());
            }
            OsgRecord {
                customer_mobile: table.cell(row, mobile).trim().to_string(),
                retailer_sku: table.cell(row, sku).trim().to_string(),
                invoice_number: table.cell(row, invoice).trim().to_string(),
                extra,
            }
        })
        .collect();
    Ok(records)
}

/// Daily store sales for the summary reports. The store column accepts
/// either `Store` or the legacy `Branch` header; rows whose date does not
/// parse are dropped, matching the upstream feed's tolerance for ragged
/// exports.
pub fn store_sales(table: &RawTable) -> Result<Vec<StoreSale>> {
    table.require_rows("sales")?;

    let date = table.require_column("sales", "DATE")?;
    let store = table
        .column_index("Store")
        .or_else(|| table.column_index("Branch"))
        .ok_or_else(|| MappingError::MissingColumn {
            table: "sales".to_string(),
            column: "Store".to_string(),
        })?;
    let quantity = table.require_column("sales", "QUANTITY")?;
    let amount = table.require_column("sales", "AMOUNT")?;

    let mut sales = Vec::with_capacity(table.rows.len());
    let mut dropped = 0usize;
    for row in &table.rows {
        let Some(parsed) = parse_day_first_date(table.cell(row, date)) else {
            dropped += 1;
            continue;
        };
        sales.push(StoreSale {
            date: parsed,
            store: table.cell(row, store).trim().to_string(),
            quantity: parse_number(table.cell(row, quantity)).unwrap_or(0.0) as i64,
            amount: parse_number(table.cell(row, amount)).unwrap_or(0.0),
        });
    }
    if dropped > 0 {
        debug!("Dropped {} sales rows with unparseable dates", dropped);
    }
    Ok(sales)
}

/// The store master list: one `Store` column, order preserved.
pub fn store_master(table: &RawTable) -> Result<Vec<String>> {
    table.require_rows("store list")?;
    let store = table.require_column("store list", "Store")?;
    Ok(table
        .rows
        .iter()
        .map(|row| table.cell(row, store).trim().to_string())
        .collect())
}

/// Store to RBM/BDM assignments. Accepts `Store` or `Branch` for the store
/// column.
pub fn store_assignments(table: &RawTable) -> Result<Vec<StoreAssignment>> {
    table.require_rows("assignment")?;
    let store = table
        .column_index("Store")
        .or_else(|| table.column_index("Branch"))
        .ok_or_else(|| MappingError::MissingColumn {
            table: "assignment".to_string(),
            column: "Store".to_string(),
        })?;
    let rbm = table.require_column("assignment", "RBM")?;
    let bdm = table.require_column("assignment", "BDM")?;

    Ok(table
        .rows
        .iter()
        .map(|row| StoreAssignment {
            store: table.cell(row, store).trim().to_string(),
            rbm: table.cell(row, rbm).trim().to_string(),
            bdm: table.cell(row, bdm).trim().to_string(),
        })
        .collect())
}

fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}
