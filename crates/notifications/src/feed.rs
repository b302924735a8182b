//! Notification sources.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use stockwise_core::NotificationId;

use crate::notification::{Notification, normalize_notifications};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FeedError::Status(status.as_u16())
        } else if e.is_decode() {
            FeedError::Decode(e.to_string())
        } else {
            FeedError::Transport(e.to_string())
        }
    }
}

/// One fetch worth of notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub notifications: Vec<Notification>,
    /// Unread total as reported by the backend, if it sent one.
    pub unread_count: Option<usize>,
}

impl FeedSnapshot {
    /// Read `{ notifications: [...], unreadCount }`; anything missing is empty.
    pub fn from_json(value: &JsonValue) -> Self {
        let notifications = value
            .get("notifications")
            .map(normalize_notifications)
            .unwrap_or_default();
        let unread_count = value
            .get("unreadCount")
            .and_then(JsonValue::as_u64)
            .map(|n| n as usize);
        Self {
            notifications,
            unread_count,
        }
    }
}

/// Anything that can produce the current notification list.
#[async_trait]
pub trait NotificationFeed: Send + Sync + 'static {
    async fn fetch(&self) -> Result<FeedSnapshot, FeedError>;
}

/// Feed backed by the inventory backend's `/api/notifications` endpoints.
#[derive(Debug, Clone)]
pub struct HttpNotificationFeed {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNotificationFeed {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/notifications{}", self.base_url, path)
    }

    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), FeedError> {
        self.client
            .put(self.url(&format!("/{id}/read")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn mark_all_read(&self) -> Result<(), FeedError> {
        self.client
            .put(self.url("/read-all"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn delete(&self, id: &NotificationId) -> Result<(), FeedError> {
        self.client
            .delete(self.url(&format!("/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl NotificationFeed for HttpNotificationFeed {
    async fn fetch(&self) -> Result<FeedSnapshot, FeedError> {
        let body: JsonValue = self
            .client
            .get(self.url(""))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(FeedSnapshot::from_json(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_reads_list_and_count() {
        let snap = FeedSnapshot::from_json(&json!({
            "notifications": [{"_id": "a", "type": "LOW_STOCK"}],
            "unreadCount": 3
        }));
        assert_eq!(snap.notifications.len(), 1);
        assert_eq!(snap.unread_count, Some(3));
    }

    #[test]
    fn snapshot_tolerates_missing_fields() {
        let snap = FeedSnapshot::from_json(&json!({}));
        assert_eq!(snap, FeedSnapshot::default());

        let snap = FeedSnapshot::from_json(&json!({"notifications": "nope", "unreadCount": -1}));
        assert!(snap.notifications.is_empty());
        assert_eq!(snap.unread_count, None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let feed = HttpNotificationFeed::new("http://localhost:5000/");
        assert_eq!(feed.url("/read-all"), "http://localhost:5000/api/notifications/read-all");
    }
}
