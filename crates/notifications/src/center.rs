//! Local notification state: the current list plus an unread counter.

use chrono::{DateTime, Utc};

use stockwise_core::NotificationId;

use crate::notification::Notification;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
    unread: usize,
    refreshed_at: Option<DateTime<Utc>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Swap in a freshly fetched list.
    ///
    /// `server_unread` wins when the backend reports one (it may count items
    /// outside the fetched page); otherwise unread items are counted locally.
    pub fn replace(&mut self, notifications: Vec<Notification>, server_unread: Option<usize>, now: DateTime<Utc>) {
        self.unread = server_unread.unwrap_or_else(|| notifications.iter().filter(|n| !n.is_read).count());
        self.notifications = notifications;
        self.refreshed_at = Some(now);
    }

    /// Returns `false` when the id is unknown or already read.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| &n.id == id) {
            Some(n) if !n.is_read => {
                n.is_read = true;
                self.unread = self.unread.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
        self.unread = 0;
    }

    /// Remove a notification; the unread counter only moves if it was unread.
    pub fn remove(&mut self, id: &NotificationId) -> Option<Notification> {
        let idx = self.notifications.iter().position(|n| &n.id == id)?;
        let removed = self.notifications.remove(idx);
        if !removed.is_read {
            self.unread = self.unread.saturating_sub(1);
        }
        Some(removed)
    }
}
