//! Candidate resolution: narrowing a customer's product purchases down to the
//! single product a plan sale belongs to.
//!
//! The cascade is a precision-over-recall policy. Each stage only runs when
//! the previous one left genuine ambiguity, and any stage that narrows to a
//! unique model commits immediately. If no stage ever reaches exactly one
//! distinct model the record stays unresolved; the engine never guesses
//! between candidates.

use crate::classify::classify_sku;
use crate::extract::price_slab;
use crate::schema::{OsgRecord, ProductRecord};

/// Determines the matching product model for one plan-sale record, or an
/// empty string when no confident match exists.
pub fn resolve_model(osg: &OsgRecord, products: &[ProductRecord]) -> String {
    // 1. Only this customer's purchases are candidates.
    let mine: Vec<&ProductRecord> = products
        .iter()
        .filter(|p| p.customer_mobile == osg.customer_mobile)
        .collect();
    if mine.is_empty() {
        return String::new();
    }

    // 2. A customer who only ever bought one model needs no disambiguation.
    let named: Vec<&str> = distinct_models(mine.iter().map(|p| p.model.as_str()))
        .into_iter()
        .filter(|m| !m.is_empty())
        .collect();
    if named.len() == 1 {
        return named[0].to_string();
    }

    // 3. Restrict to the product categories the plan SKU can cover.
    let keywords = classify_sku(&osg.retailer_sku);
    let by_category: Vec<&ProductRecord> = mine
        .into_iter()
        .filter(|p| keywords.iter().any(|kw| p.category.to_lowercase() == *kw))
        .collect();
    if let Some(model) = sole_model(&by_category) {
        return model;
    }

    // 4. Restrict by the SKU's price slab. Without a slab there is nothing
    //    left to narrow on.
    let Some(slab) = price_slab(&osg.retailer_sku) else {
        return String::new();
    };
    let by_rate: Vec<&ProductRecord> = by_category
        .into_iter()
        .filter(|p| p.item_rate.is_some_and(|rate| slab.contains(rate)))
        .collect();
    if let Some(model) = sole_model(&by_rate) {
        return model;
    }

    // 5. Last resort: the plan and the product were billed on the same invoice.
    let by_invoice: Vec<&ProductRecord> = by_rate
        .into_iter()
        .filter(|p| p.invoice_number == osg.invoice_number)
        .collect();
    if let Some(model) = sole_model(&by_invoice) {
        return model;
    }

    String::new()
}

/// Category and brand for an already-resolved `(customer_mobile, model)`
/// pair: the first product row carrying that pair supplies both.
pub fn category_brand<'a>(
    customer_mobile: &str,
    model: &str,
    products: &'a [ProductRecord],
) -> Option<(&'a str, &'a str)> {
    products
        .iter()
        .find(|p| p.customer_mobile == customer_mobile && p.model == model)
        .map(|p| (p.category.as_str(), p.brand.as_str()))
}

/// The single distinct model among the candidates, if there is exactly one.
fn sole_model(candidates: &[&ProductRecord]) -> Option<String> {
    let models = distinct_models(candidates.iter().map(|p| p.model.as_str()));
    if models.len() == 1 {
        Some(models[0].to_string())
    } else {
        None
    }
}

fn distinct_models<'a>(models: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for model in models {
        if !seen.contains(&model) {
            seen.push(model);
        }
    }
    seen
}
