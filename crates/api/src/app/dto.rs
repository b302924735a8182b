use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use stockwise_core::ProductId;
use stockwise_core::coerce::lenient;
use stockwise_inventory::{MovementFilter, StockStatus};
use stockwise_reporting::ProductQuery;
use stockwise_reporting::table::DEFAULT_PAGE_SIZE;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub low_stock_threshold: i64,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub last_sold_at: Option<DateTime<Utc>>,
}

/// Product table request: the snapshot plus the table controls.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQueryRequest {
    #[serde(default)]
    pub products: Value,
    #[serde(default)]
    pub search: Option<String>,
    /// Status name, or `ALL`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl ProductQueryRequest {
    pub fn to_query(&self) -> Result<ProductQuery, stockwise_core::DomainError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) if s.eq_ignore_ascii_case("all") => None,
            Some(s) => Some(s.parse::<StockStatus>()?),
        };

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(ProductQuery {
            search,
            status,
            page: self.page.unwrap_or(1).max(1),
            page_size: self.page_size.filter(|n| *n > 0).unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    #[serde(default)]
    pub products: Value,
    #[serde(default)]
    pub monthly_movements: Value,
    /// Raw movement records for the recent-activity list.
    #[serde(default)]
    pub movements: Value,
}

/// Raw movement report input: either a bare array of movements or
/// `{ movements, startDate?, endDate?, type? }`.
#[derive(Debug, Clone, Default)]
pub struct MovementReportRequest {
    pub movements: Value,
    pub filter: MovementFilter,
}

impl MovementReportRequest {
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Object(mut map) => {
                let movements = map.remove("movements").unwrap_or(Value::Null);
                let filter = serde_json::from_value(Value::Object(map))?;
                Ok(Self { movements, filter })
            }
            other => Ok(Self {
                movements: other,
                filter: MovementFilter::default(),
            }),
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: StockStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductStatusLine {
    pub id: ProductId,
    pub sku: String,
    pub status: StockStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockwise_inventory::MovementType;

    #[test]
    fn classify_request_coerces_loose_numbers() {
        let req: ClassifyRequest = serde_json::from_value(json!({
            "quantity": "12",
            "lowStockThreshold": null,
            "lastSoldAt": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(req.quantity, 12);
        assert_eq!(req.low_stock_threshold, 0);
        assert!(req.last_sold_at.is_some());
    }

    #[test]
    fn all_status_means_no_filter() {
        let req: ProductQueryRequest = serde_json::from_value(json!({ "status": "ALL", "page": 0 })).unwrap();
        let query = req.to_query().unwrap();
        assert_eq!(query.status, None);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let req: ProductQueryRequest = serde_json::from_value(json!({ "status": "SOMETIMES" })).unwrap();
        assert!(req.to_query().is_err());
    }

    #[test]
    fn movement_request_accepts_array_or_object() {
        let bare = MovementReportRequest::from_json(json!([{ "type": "IN" }])).unwrap();
        assert!(bare.movements.is_array());
        assert_eq!(bare.filter, MovementFilter::default());

        let wrapped = MovementReportRequest::from_json(json!({
            "movements": [],
            "startDate": "2024-01-01",
            "type": "out"
        }))
        .unwrap();
        assert_eq!(wrapped.filter.kind, Some(MovementType::Out));
        assert!(wrapped.filter.start_date.is_some());
    }
}
