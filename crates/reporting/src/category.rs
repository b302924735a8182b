//! Category valuation roll-up.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockwise_core::ValueObject;
use stockwise_products::Product;

/// Bucket for products with no (or a blank) category. They are grouped, never
/// dropped.
pub const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub total_cost_value: f64,
    pub total_selling_value: f64,
}

impl ValueObject for CategoryTotals {}

/// `{ category, totalCostValue, totalSellingValue }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub category: String,
    pub total_cost_value: f64,
    pub total_selling_value: f64,
}

impl ValueObject for CategoryBucket {}

pub(crate) fn category_key(product: &Product) -> &str {
    product
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNCATEGORIZED)
}

/// Sum `quantity × price` per category; missing prices count as zero.
pub fn aggregate_by_category(products: &[Product]) -> BTreeMap<String, CategoryTotals> {
    let mut out: BTreeMap<String, CategoryTotals> = BTreeMap::new();

    for p in products {
        let totals = out.entry(category_key(p).to_string()).or_default();
        totals.total_cost_value += p.cost_value();
        totals.total_selling_value += p.selling_value();
    }

    out
}

/// [`aggregate_by_category`] as a list of chart rows, ordered by category name.
pub fn category_buckets(products: &[Product]) -> Vec<CategoryBucket> {
    aggregate_by_category(products)
        .into_iter()
        .map(|(category, t)| CategoryBucket {
            category,
            total_cost_value: t.total_cost_value,
            total_selling_value: t.total_selling_value,
        })
        .collect()
}
