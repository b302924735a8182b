use std::sync::Arc;

use chrono::{DateTime, Utc};

use stockwise_inventory::StatusClassifier;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// State shared by every handler. Nothing here is mutable: each request
/// recomputes from the snapshot it carries.
#[derive(Clone)]
pub struct AppServices {
    pub classifier: StatusClassifier,
    clock: Clock,
}

impl AppServices {
    pub fn new(classifier: StatusClassifier) -> Self {
        Self {
            classifier,
            clock: Arc::new(Utc::now),
        }
    }

    /// Pin "now" for every request.
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Arc::new(move || now);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}
