use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockwise_core::coerce::lenient;
use stockwise_core::{DomainError, DomainResult, Entity, NotificationId, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    LowStock,
    ExpiryAlert,
    ReorderReminder,
    StockOut,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// The slice of the product a notification refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sku: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationMetadata {
    pub current_stock: Option<i64>,
    pub threshold: Option<i64>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub days_until_expiry: Option<i64>,
    pub reorder_point: Option<i64>,
    pub suggested_quantity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id")]
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// Absent when the product has since been deleted.
    #[serde(default)]
    pub product: Option<ProductSummary>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_email_sent: bool,
    #[serde(default)]
    pub is_push_sent: bool,
    /// `None` when the backend sent no readable timestamp.
    #[serde(default, deserialize_with = "lenient::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NotificationMetadata>,
}

impl Notification {
    pub fn new(id: NotificationId, kind: NotificationKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            message: String::new(),
            product: None,
            priority: Priority::default(),
            is_read: false,
            is_email_sent: false,
            is_push_sent: false,
            created_at: None,
            metadata: None,
        }
    }

    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn read(mut self) -> Self {
        self.is_read = true;
        self
    }

    pub fn from_json(value: &JsonValue) -> DomainResult<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::validation(format!("notification: {e}")))
    }
}

impl Entity for Notification {
    type Id = NotificationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read a notification list; non-arrays are empty and bad rows are skipped.
pub fn normalize_notifications(value: &JsonValue) -> Vec<Notification> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match Notification::from_json(item) {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed notification");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn parses_backend_shape() {
        let n = Notification::from_json(&json!({
            "_id": "n1",
            "type": "LOW_STOCK",
            "title": "Low stock: Widget",
            "message": "Widget is below its threshold",
            "product": {"_id": "p1", "name": "Widget", "sku": "W-1", "quantity": 2},
            "priority": "high",
            "isRead": false,
            "isEmailSent": true,
            "isPushSent": false,
            "createdAt": "2024-05-01T08:00:00Z",
            "metadata": {"currentStock": 2, "threshold": 10, "suggestedQuantity": 20}
        }))
        .unwrap();

        assert_eq!(n.kind, NotificationKind::LowStock);
        assert_eq!(n.priority, Priority::High);
        assert_eq!(n.product.as_ref().map(|p| p.quantity), Some(2));
        let meta = n.metadata.unwrap();
        assert_eq!(meta.threshold, Some(10));
        assert_eq!(meta.expiry_date, None);
        assert_eq!(n.created_at, Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()));
    }

    #[test]
    fn sparse_notification_gets_defaults() {
        let n = Notification::from_json(&json!({"_id": "n2", "type": "STOCK_OUT"})).unwrap();
        assert!(!n.is_read);
        assert_eq!(n.priority, Priority::Medium);
        assert!(n.product.is_none());
        assert_eq!(n.created_at, None);
    }

    #[test]
    fn normalizing_twice_gives_identical_records() {
        let raw = json!([
            {"_id": "a", "type": "LOW_STOCK"},
            {"_id": "b", "type": "STOCK_OUT", "createdAt": "not a date"}
        ]);
        let first = normalize_notifications(&raw);
        let second = normalize_notifications(&raw);
        assert_eq!(first, second);
        assert!(first.iter().all(|n| n.created_at.is_none()));

        let json = serde_json::to_value(&first[0]).unwrap();
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn normalize_skips_unknown_kinds() {
        let list = normalize_notifications(&json!([
            {"_id": "a", "type": "EXPIRY_ALERT"},
            {"_id": "b", "type": "BIRTHDAY"},
            {"type": "REORDER_REMINDER"}
        ]));
        assert_eq!(list.len(), 1);
        assert!(normalize_notifications(&json!({"notifications": []})).is_empty());
    }

    #[test]
    fn priorities_are_ordered() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::Low < Priority::Medium);
    }
}
