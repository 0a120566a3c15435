//! Aggregate store sales summaries: the day/month rollups that accompany the
//! reconciled mapping report. Pure group-by-and-merge over the daily sales
//! feed; rendering, coloring, and PDF layout belong to the formatting
//! collaborator.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One line of the daily sales feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSale {
    pub date: NaiveDate,
    pub store: String,
    pub quantity: i64,
    pub amount: f64,
}

/// Store to regional/business development manager assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreAssignment {
    pub store: String,
    pub rbm: String,
    pub bdm: String,
}

/// For-the-day and month-to-date performance of one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSummaryRow {
    pub store: String,
    pub ftd_count: i64,
    pub ftd_amount: f64,
    pub mtd_count: i64,
    pub mtd_amount: f64,
    pub rbm: Option<String>,
    pub bdm: Option<String>,
}

/// Whole-period performance of one store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRollupRow {
    pub store: String,
    pub quantity: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub ftd_count: i64,
    pub ftd_amount: f64,
    pub mtd_count: i64,
    pub mtd_amount: f64,
}

/// FTD/MTD summary per store for the given report date, over the union of
/// the master list and every store seen in the feed (master-list order
/// first). Stores without sales stay in the report with zeros; the result is
/// sorted by MTD amount descending.
pub fn build_store_summary(
    sales: &[StoreSale],
    store_master: &[String],
    assignments: &[StoreAssignment],
    report_date: NaiveDate,
) -> Vec<StoreSummaryRow> {
    let mut mtd: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
    let mut ftd: BTreeMap<&str, (i64, f64)> = BTreeMap::new();

    for sale in sales {
        // MTD is scoped to the report month of the report year.
        if sale.date.year() != report_date.year() || sale.date.month() != report_date.month() {
            continue;
        }
        let entry = mtd.entry(sale.store.as_str()).or_default();
        entry.0 += sale.quantity;
        entry.1 += sale.amount;
        if sale.date == report_date {
            let entry = ftd.entry(sale.store.as_str()).or_default();
            entry.0 += sale.quantity;
            entry.1 += sale.amount;
        }
    }

    let mut rows: Vec<StoreSummaryRow> = union_of_stores(store_master, sales)
        .into_iter()
        .map(|store| {
            let (mtd_count, mtd_amount) = mtd.get(store.as_str()).copied().unwrap_or_default();
            let (ftd_count, ftd_amount) = ftd.get(store.as_str()).copied().unwrap_or_default();
            let assignment = assignments.iter().find(|a| a.store == store);
            StoreSummaryRow {
                store,
                ftd_count,
                ftd_amount,
                mtd_count,
                mtd_amount,
                rbm: assignment.map(|a| a.rbm.clone()),
                bdm: assignment.map(|a| a.bdm.clone()),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.mtd_amount.total_cmp(&a.mtd_amount));
    rows
}

pub fn summary_totals(rows: &[StoreSummaryRow]) -> SummaryTotals {
    let mut totals = SummaryTotals::default();
    for row in rows {
        totals.ftd_count += row.ftd_count;
        totals.ftd_amount += row.ftd_amount;
        totals.mtd_count += row.mtd_count;
        totals.mtd_amount += row.mtd_amount;
    }
    totals
}

/// Whole-feed quantity/amount per store, union with the master list, sorted
/// by amount descending.
pub fn build_store_rollup(sales: &[StoreSale], store_master: &[String]) -> Vec<StoreRollupRow> {
    let mut totals: BTreeMap<&str, (i64, f64)> = BTreeMap::new();
    for sale in sales {
        let entry = totals.entry(sale.store.as_str()).or_default();
        entry.0 += sale.quantity;
        entry.1 += sale.amount;
    }

    let mut rows: Vec<StoreRollupRow> = union_of_stores(store_master, sales)
        .into_iter()
        .map(|store| {
            let (quantity, amount) = totals.get(store.as_str()).copied().unwrap_or_default();
            StoreRollupRow {
                store,
                quantity,
                amount,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    rows
}

pub fn rollup_totals(rows: &[StoreRollupRow]) -> (i64, f64) {
    rows.iter()
        .fold((0, 0.0), |(q, a), row| (q + row.quantity, a + row.amount))
}

fn union_of_stores(store_master: &[String], sales: &[StoreSale]) -> Vec<String> {
    let mut stores: Vec<String> = Vec::new();
    for store in store_master {
        if !stores.contains(store) {
            stores.push(store.clone());
        }
    }
    for sale in sales {
        if !stores.contains(&sale.store) {
            stores.push(sale.store.clone());
        }
    }
    stores
}
