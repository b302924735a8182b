//! Notification center.
//!
//! - `notification`: the notification record as served by the backend
//! - `center`: local list + unread bookkeeping
//! - `feed`: where notifications come from (HTTP, or anything implementing the trait)
//! - `poller`: a refresh task owned by whoever displays the notifications

pub mod center;
pub mod feed;
pub mod notification;
pub mod poller;

pub use center::NotificationCenter;
pub use feed::{FeedError, FeedSnapshot, HttpNotificationFeed, NotificationFeed};
pub use notification::{
    Notification, NotificationKind, NotificationMetadata, Priority, ProductSummary, normalize_notifications,
};
pub use poller::{MIN_POLL_INTERVAL, NotificationPoller, PollerConfig, PollerHandle};
