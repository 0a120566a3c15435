//! Per-run allocation pools: hands out one product unit's invoice number,
//! item rate, and IMEI per plan-sale record, never reusing a unit.
//!
//! Pools are built once per run from the product table and hold each
//! `(customer_mobile, model)` group's values in original row order. Each of
//! the three attributes keeps its own cursor per key because they are drawn
//! through separate calls; callers must allocate in the plan table's row
//! order for the run to be deterministic.

use crate::schema::{PoolKey, ProductRecord};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct UnitPool {
    invoice_numbers: Vec<String>,
    item_rates: Vec<Option<f64>>,
    imeis: Vec<String>,
}

#[derive(Debug, Default)]
struct Cursors {
    invoice: usize,
    item_rate: usize,
    imei: usize,
}

/// Run-scoped allocation state. Rebuilt at the start of every run, never
/// persisted.
#[derive(Debug, Default)]
pub struct AllocationPools {
    pools: BTreeMap<PoolKey, UnitPool>,
    cursors: BTreeMap<PoolKey, Cursors>,
}

impl AllocationPools {
    pub fn build(products: &[ProductRecord]) -> Self {
        let mut pools: BTreeMap<PoolKey, UnitPool> = BTreeMap::new();
        for product in products {
            let key = PoolKey::new(product.customer_mobile.clone(), product.model.clone());
            let pool = pools.entry(key).or_default();
            pool.invoice_numbers.push(product.invoice_number.clone());
            pool.item_rates.push(product.item_rate);
            pool.imeis.push(product.imei.clone());
        }
        Self {
            pools,
            cursors: BTreeMap::new(),
        }
    }

    /// Next unallocated invoice number for the key, or `None` once every
    /// unit's invoice has been handed out.
    pub fn next_invoice(&mut self, key: &PoolKey) -> Option<String> {
        let pool = self.pools.get(key)?;
        let cursor = &mut self.cursors.entry(key.clone()).or_default().invoice;
        let value = pool.invoice_numbers.get(*cursor)?.clone();
        *cursor += 1;
        Some(value)
    }

    /// Next unallocated item rate. The outer `Option` signals exhaustion;
    /// the inner one carries the source row's unparseable-rate state.
    pub fn next_item_rate(&mut self, key: &PoolKey) -> Option<Option<f64>> {
        let pool = self.pools.get(key)?;
        let cursor = &mut self.cursors.entry(key.clone()).or_default().item_rate;
        let value = *pool.item_rates.get(*cursor)?;
        *cursor += 1;
        Some(value)
    }

    /// Next unallocated IMEI for the key.
    pub fn next_imei(&mut self, key: &PoolKey) -> Option<String> {
        let pool = self.pools.get(key)?;
        let cursor = &mut self.cursors.entry(key.clone()).or_default().imei;
        let value = pool.imeis.get(*cursor)?.clone();
        *cursor += 1;
        Some(value)
    }
}
