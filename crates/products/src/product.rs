use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockwise_core::coerce::lenient;
use stockwise_core::{DomainError, DomainResult, Entity, ProductId};

/// Product snapshot.
///
/// Owned and persisted by the inventory backend; this type only mirrors what a
/// fetch returned. Numeric fields are coerced on the way in (missing or
/// non-numeric counts as `0`), negative values are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sku: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub low_stock_threshold: i64,
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub last_sold_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number", skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number", skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, sku: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sku: sku.into(),
            quantity: 0,
            low_stock_threshold: 0,
            last_sold_at: None,
            category: None,
            cost_price: None,
            selling_price: None,
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn with_last_sold_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_sold_at = Some(at);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_prices(mut self, cost: f64, selling: f64) -> Self {
        self.cost_price = Some(cost);
        self.selling_price = Some(selling);
        self
    }

    /// Parse one product from untyped JSON.
    pub fn from_json(value: &JsonValue) -> DomainResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::validation(format!("product: {e}")))
    }

    /// `quantity × cost_price`, with a missing price counting as zero.
    pub fn cost_value(&self) -> f64 {
        self.quantity as f64 * self.cost_price.unwrap_or(0.0)
    }

    /// `quantity × selling_price`, with a missing price counting as zero.
    pub fn selling_value(&self) -> f64 {
        self.quantity as f64 * self.selling_price.unwrap_or(0.0)
    }

    /// Case-insensitive substring match on name or SKU.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.sku.to_lowercase().contains(&needle)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Normalize a product list fetched from the backend.
///
/// A non-array payload yields an empty list; elements that cannot be read as
/// a product (no usable id, not an object) are skipped.
pub fn normalize_products(value: &JsonValue) -> Vec<Product> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match Product::from_json(item) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed product record");
                None
            }
        })
        .collect()
}
