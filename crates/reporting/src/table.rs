//! Product table: search, status filter and pagination.
//!
//! The status filter uses the same classifier as the status badge, so a row
//! filtered as LOW always renders as LOW.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockwise_inventory::{StatusClassifier, StockStatus};
use stockwise_products::Product;

pub const DEFAULT_PAGE_SIZE: usize = 5;

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// `None` shows every status.
    #[serde(default)]
    pub status: Option<StockStatus>,
    /// 1-based.
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// A product together with its derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub status: StockStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductRow>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl ProductQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_status(mut self, status: StockStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Every matching row, in input order, before pagination.
    pub fn filter(&self, products: &[Product], classifier: &StatusClassifier, now: DateTime<Utc>) -> Vec<ProductRow> {
        let needle = self.search.as_deref().map(str::trim).unwrap_or("");

        products
            .iter()
            .filter(|p| p.matches_search(needle))
            .map(|p| ProductRow {
                status: classifier.classify_product_at(p, now),
                product: p.clone(),
            })
            .filter(|row| self.status.is_none_or(|s| row.status == s))
            .collect()
    }

    /// Filter, then cut out the requested page. Out-of-range pages are empty.
    pub fn run(&self, products: &[Product], classifier: &StatusClassifier, now: DateTime<Utc>) -> ProductPage {
        let page_size = if self.page_size == 0 { DEFAULT_PAGE_SIZE } else { self.page_size };
        let page = self.page.max(1);

        let rows = self.filter(products, classifier, now);
        let total_items = rows.len();
        let total_pages = total_items.div_ceil(page_size);

        let items = rows
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        ProductPage {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}
