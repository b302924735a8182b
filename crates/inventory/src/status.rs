//! Stock status classification.
//!
//! Priority order, first match wins:
//! 1. zero quantity → [`StockStatus::OutOfStock`] (even when the item is also stale)
//! 2. last sale older than the dead-stock window → [`StockStatus::Dead`]
//! 3. quantity below the low-stock threshold → [`StockStatus::Low`]
//! 4. otherwise [`StockStatus::Ok`]

use core::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use stockwise_core::{DomainError, ValueObject};
use stockwise_products::Product;

/// Days without a sale after which stock counts as dead.
pub const DEFAULT_DEAD_STOCK_DAYS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Ok,
    Low,
    Dead,
    OutOfStock,
}

impl ValueObject for StockStatus {}

impl StockStatus {
    pub const ALL: [StockStatus; 4] = [Self::Ok, Self::Low, Self::Dead, Self::OutOfStock];

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Ok => "OK",
            StockStatus::Low => "LOW",
            StockStatus::Dead => "DEAD",
            StockStatus::OutOfStock => "OUT_OF_STOCK",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        StockStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == normalized)
            .ok_or_else(|| DomainError::validation(format!("unknown stock status: {s}")))
    }
}

/// Stateless classifier; the only knob is the dead-stock window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StatusClassifier {
    dead_after: TimeDelta,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self {
            dead_after: TimeDelta::days(DEFAULT_DEAD_STOCK_DAYS),
        }
    }
}

impl StatusClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dead_after(mut self, dead_after: TimeDelta) -> Self {
        self.dead_after = dead_after;
        self
    }

    /// Day counts beyond what `TimeDelta` can hold saturate at its bounds.
    pub fn with_dead_after_days(self, days: i64) -> Self {
        let window = TimeDelta::try_days(days).unwrap_or(if days < 0 { TimeDelta::MIN } else { TimeDelta::MAX });
        self.with_dead_after(window)
    }

    pub fn dead_after(&self) -> TimeDelta {
        self.dead_after
    }

    /// Classify against an explicit clock.
    ///
    /// Negative quantities and thresholds are not clamped: a negative quantity
    /// is non-zero, so it falls through to the staleness and threshold checks.
    pub fn classify_at(
        &self,
        quantity: i64,
        threshold: i64,
        last_sold_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> StockStatus {
        if quantity == 0 {
            return StockStatus::OutOfStock;
        }
        if last_sold_at.is_some_and(|sold| now - sold > self.dead_after) {
            return StockStatus::Dead;
        }
        if quantity < threshold {
            return StockStatus::Low;
        }
        StockStatus::Ok
    }

    pub fn classify(&self, quantity: i64, threshold: i64, last_sold_at: Option<DateTime<Utc>>) -> StockStatus {
        self.classify_at(quantity, threshold, last_sold_at, Utc::now())
    }

    pub fn classify_product_at(&self, product: &Product, now: DateTime<Utc>) -> StockStatus {
        self.classify_at(product.quantity, product.low_stock_threshold, product.last_sold_at, now)
    }

    pub fn classify_product(&self, product: &Product) -> StockStatus {
        self.classify_product_at(product, Utc::now())
    }
}

/// Classify with the default 60-day dead-stock window and the current time.
pub fn classify(quantity: i64, threshold: i64, last_sold_at: Option<DateTime<Utc>>) -> StockStatus {
    StatusClassifier::default().classify(quantity, threshold, last_sold_at)
}
