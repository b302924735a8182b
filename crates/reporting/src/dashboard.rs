//! Dashboard summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockwise_core::ValueObject;
use stockwise_inventory::{MovementLog, StatusClassifier, StockMovement, StockStatus};
use stockwise_products::Product;

use crate::category::{CategoryBucket, category_buckets};
use crate::low_stock::{LowStockLine, LowStockReport};
use crate::monthly::{MonthlyBucket, MovementGroup, aggregate_monthly};

/// Movements listed under "recent activity".
pub const RECENT_MOVEMENTS_LIMIT: usize = 5;

/// Number of products per stock status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub ok: usize,
    pub low: usize,
    pub dead: usize,
    pub out_of_stock: usize,
}

impl ValueObject for StatusCounts {}

impl StatusCounts {
    pub fn tally(products: &[Product], classifier: &StatusClassifier, now: DateTime<Utc>) -> Self {
        let mut counts = Self::default();
        for p in products {
            counts.record(classifier.classify_product_at(p, now));
        }
        counts
    }

    pub fn record(&mut self, status: StockStatus) {
        match status {
            StockStatus::Ok => self.ok += 1,
            StockStatus::Low => self.low += 1,
            StockStatus::Dead => self.dead += 1,
            StockStatus::OutOfStock => self.out_of_stock += 1,
        }
    }

    pub fn get(&self, status: StockStatus) -> usize {
        match status {
            StockStatus::Ok => self.ok,
            StockStatus::Low => self.low,
            StockStatus::Dead => self.dead,
            StockStatus::OutOfStock => self.out_of_stock,
        }
    }

    pub fn total(&self) -> usize {
        self.ok + self.low + self.dead + self.out_of_stock
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: usize,
    /// Inventory value at cost.
    pub total_value: f64,
    pub in_stock_products: usize,
    pub low_stock_products: usize,
    pub out_of_stock_products: usize,
    pub dead_stock_products: usize,
    pub monthly_movements: Vec<MonthlyBucket>,
    pub category_stats: Vec<CategoryBucket>,
    pub low_stock_list: Vec<LowStockLine>,
    /// Newest first, at most [`RECENT_MOVEMENTS_LIMIT`].
    pub recent_movements: Vec<StockMovement>,
}

impl DashboardSummary {
    pub fn build(
        products: &[Product],
        groups: &[MovementGroup],
        movements: &MovementLog,
        classifier: &StatusClassifier,
        now: DateTime<Utc>,
    ) -> Self {
        let counts = StatusCounts::tally(products, classifier, now);

        Self {
            total_products: products.len(),
            total_value: products.iter().map(Product::cost_value).sum(),
            in_stock_products: counts.ok,
            low_stock_products: counts.low,
            out_of_stock_products: counts.out_of_stock,
            dead_stock_products: counts.dead,
            monthly_movements: aggregate_monthly(groups),
            category_stats: category_buckets(products),
            low_stock_list: LowStockReport::build(products).products,
            recent_movements: movements
                .recent(RECENT_MOVEMENTS_LIMIT)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
