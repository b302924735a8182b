//! Low-stock (restock) report.

use serde::{Deserialize, Serialize};

use stockwise_core::ProductId;
use stockwise_products::Product;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockLine {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub low_stock_threshold: i64,
    /// Units required to reach the threshold again.
    pub needed: i64,
    /// Value of what is left on hand, at cost.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub total_products: usize,
    pub total_needed: i64,
    /// Value at cost still on hand across the listed products.
    pub total_value: f64,
    pub products: Vec<LowStockLine>,
}

impl LowStockReport {
    /// Every product below its threshold, out-of-stock ones included, in
    /// input order.
    pub fn build(products: &[Product]) -> Self {
        let lines: Vec<LowStockLine> = products
            .iter()
            .filter(|p| p.quantity < p.low_stock_threshold)
            .map(|p| LowStockLine {
                product_id: p.id.clone(),
                name: p.name.clone(),
                sku: p.sku.clone(),
                quantity: p.quantity,
                low_stock_threshold: p.low_stock_threshold,
                needed: p.low_stock_threshold.saturating_sub(p.quantity),
                value: p.cost_value(),
            })
            .collect();

        Self {
            total_products: lines.len(),
            total_needed: lines.iter().fold(0i64, |acc, l| acc.saturating_add(l.needed)),
            total_value: lines.iter().map(|l| l.value).sum(),
            products: lines,
        }
    }
}
