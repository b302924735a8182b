//! Periodic notification refresh.
//!
//! The poller is owned by whoever shows notifications: `start` when the view
//! mounts, `stop` when it goes away. There is no process-wide timer.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;

use crate::center::NotificationCenter;
use crate::feed::{FeedError, NotificationFeed};

/// Shortest allowed time between refreshes.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Poller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    /// Time between refreshes. The first refresh happens immediately.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

impl PollerConfig {
    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    /// The interval the loop actually runs at.
    pub fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_POLL_INTERVAL)
    }
}

pub struct NotificationPoller<F: NotificationFeed> {
    feed: Arc<F>,
    center: Arc<RwLock<NotificationCenter>>,
    config: PollerConfig,
}

impl<F: NotificationFeed> NotificationPoller<F> {
    pub fn new(feed: F, config: PollerConfig) -> Self {
        Self::with_center(feed, Arc::new(RwLock::new(NotificationCenter::new())), config)
    }

    /// Share an existing center (e.g. one the UI already renders from).
    pub fn with_center(feed: F, center: Arc<RwLock<NotificationCenter>>, config: PollerConfig) -> Self {
        Self {
            feed: Arc::new(feed),
            center,
            config,
        }
    }

    pub fn center(&self) -> Arc<RwLock<NotificationCenter>> {
        self.center.clone()
    }

    /// Fetch once and swap the result into the center.
    ///
    /// On failure the center keeps its previous contents.
    pub async fn refresh(&self) -> Result<(), FeedError> {
        refresh(self.feed.as_ref(), &self.center).await
    }

    /// Spawn the refresh loop on the current tokio runtime.
    pub fn start(self) -> PollerHandle {
        let shutdown = Arc::new(Notify::new());
        let center = self.center.clone();

        let task_shutdown = shutdown.clone();
        let period = self.config.effective_interval();
        let join = tokio::spawn(async move {
            tracing::info!(interval_secs = period.as_secs(), "notification poller started");

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = task_shutdown.notified() => {
                        tracing::info!("notification poller received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        if let Err(e) = refresh(self.feed.as_ref(), &self.center).await {
                            tracing::warn!(error = %e, "notification refresh failed; keeping last list");
                        }
                    }
                }
            }

            tracing::info!("notification poller stopped");
        });

        PollerHandle {
            shutdown,
            join: Some(join),
            center,
        }
    }
}

async fn refresh<F: NotificationFeed + ?Sized>(
    feed: &F,
    center: &RwLock<NotificationCenter>,
) -> Result<(), FeedError> {
    let snapshot = feed.fetch().await?;
    let count = snapshot.notifications.len();
    center
        .write()
        .await
        .replace(snapshot.notifications, snapshot.unread_count, Utc::now());
    tracing::debug!(count, "notifications refreshed");
    Ok(())
}

/// Handle to a running poller. Dropping it aborts the task.
#[derive(Debug)]
pub struct PollerHandle {
    shutdown: Arc<Notify>,
    join: Option<JoinHandle<()>>,
    center: Arc<RwLock<NotificationCenter>>,
}

impl PollerHandle {
    pub fn center(&self) -> Arc<RwLock<NotificationCenter>> {
        self.center.clone()
    }

    pub fn is_running(&self) -> bool {
        self.join.as_ref().is_some_and(|j| !j.is_finished())
    }

    /// Signal shutdown and wait for the loop to exit.
    pub async fn stop(mut self) {
        // `notify_one` stores a permit, so this works even if the loop is
        // mid-refresh and not yet waiting.
        self.shutdown.notify_one();
        if let Some(join) = self.join.take() {
            let _ = join.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}
