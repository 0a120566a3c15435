//! Final row assembly and validation: a fixed 30-column report plus a
//! per-row highlight flag for the formatting collaborator.

use crate::error::Result;
use crate::schema::{OsgRecord, WarrantyTerms};
use serde::{Deserialize, Serialize};

/// The contractual output columns, in order.
pub const FINAL_COLUMNS: [&str; 30] = [
    "Customer Mobile",
    "Date",
    "Invoice Number",
    "Product Invoice Number",
    "Customer Name",
    "Store Code",
    "Branch",
    "Region",
    "IMEI",
    "Category",
    "Brand",
    "Quantity",
    "Item Code",
    "Model",
    "Plan Type",
    "EWS QTY",
    "Item Rate",
    "Plan Price",
    "Sold Price",
    "Email",
    "Product Count",
    "Manufacturer Warranty",
    "Retailer SKU",
    "OnsiteGo SKU",
    "Duration (Year)",
    "Total Coverage",
    "Comment",
    "Return Flag",
    "Return against invoice No.",
    "Primary Invoice No.",
];

/// One fully reconciled plan-sale record: the ingested row plus everything
/// the pipeline derived for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappedRow {
    pub osg: OsgRecord,
    pub model: String,
    pub category: String,
    pub brand: String,
    pub product_invoice_number: String,
    pub item_rate: Option<f64>,
    pub imei: String,
    pub store_code: String,
    pub warranty: Option<WarrantyTerms>,
}

impl MappedRow {
    pub fn plan_price(&self) -> Option<f64> {
        crate::schema::parse_number(self.osg.field("Plan Price"))
    }
}

/// Pure validation predicate: a row needs attention when its model or IMEI
/// is blank, or its plan price is unparseable or negative. Flagged rows are
/// highlighted downstream, never dropped.
pub fn needs_attention(row: &MappedRow) -> bool {
    if row.model.trim().is_empty() || row.imei.trim().is_empty() {
        return true;
    }
    match row.plan_price() {
        Some(price) => price < 0.0,
        None => true,
    }
}

/// One rendered output row: 30 cells in `FINAL_COLUMNS` order plus the
/// highlight flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub cells: Vec<String>,
    pub needs_attention: bool,
}

/// The reconciled report handed to the formatting collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTable {
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    pub fn from_mapped(rows: &[MappedRow]) -> Self {
        Self {
            rows: rows.iter().map(render_row).collect(),
        }
    }

    pub fn columns() -> &'static [&'static str] {
        &FINAL_COLUMNS
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn render_row(row: &MappedRow) -> ReportRow {
    let cells = FINAL_COLUMNS
        .iter()
        .map(|column| render_cell(row, column))
        .collect();
    ReportRow {
        cells,
        needs_attention: needs_attention(row),
    }
}

fn render_cell(row: &MappedRow, column: &str) -> String {
    match column {
        "Customer Mobile" => row.osg.customer_mobile.clone(),
        "Invoice Number" => row.osg.invoice_number.clone(),
        "Retailer SKU" => row.osg.retailer_sku.clone(),
        "Product Invoice Number" => row.product_invoice_number.clone(),
        "Store Code" => row.store_code.clone(),
        "IMEI" => row.imei.clone(),
        "Category" => row.category.clone(),
        "Brand" => row.brand.clone(),
        "Model" => row.model.clone(),
        // One plan unit per row by construction.
        "Quantity" | "EWS QTY" => "1".to_string(),
        "Item Rate" => row.item_rate.map(format_number).unwrap_or_default(),
        "Manufacturer Warranty" => row
            .warranty
            .as_ref()
            .map(|w| w.manufacturer_years.to_string())
            .unwrap_or_default(),
        "Duration (Year)" => row
            .warranty
            .as_ref()
            .map(|w| w.duration.to_string())
            .unwrap_or_default(),
        other => row.osg.field(other).to_string(),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
