//! Stock value report: per-product valuation plus category roll-up.

use serde::{Deserialize, Serialize};

use stockwise_core::ProductId;
use stockwise_products::Product;

use crate::category::{CategoryBucket, category_buckets};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockValueLine {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub total_cost: f64,
    pub total_selling: f64,
    /// `total_selling - total_cost`
    pub profit: f64,
}

impl StockValueLine {
    pub fn from_product(p: &Product) -> Self {
        let total_cost = p.cost_value();
        let total_selling = p.selling_value();
        Self {
            product_id: p.id.clone(),
            name: p.name.clone(),
            sku: p.sku.clone(),
            quantity: p.quantity,
            total_cost,
            total_selling,
            profit: total_selling - total_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockValueReport {
    pub total_products: usize,
    pub total_cost_value: f64,
    pub total_selling_value: f64,
    pub potential_profit: f64,
    pub by_category: Vec<CategoryBucket>,
    pub products: Vec<StockValueLine>,
}

impl StockValueReport {
    pub fn build(products: &[Product]) -> Self {
        let lines: Vec<StockValueLine> = products.iter().map(StockValueLine::from_product).collect();
        let total_cost_value: f64 = lines.iter().map(|l| l.total_cost).sum();
        let total_selling_value: f64 = lines.iter().map(|l| l.total_selling).sum();

        Self {
            total_products: lines.len(),
            total_cost_value,
            total_selling_value,
            potential_profit: total_selling_value - total_cost_value,
            by_category: category_buckets(products),
            products: lines,
        }
    }
}
