//! Runtime configuration, read from the environment.
//!
//! - `STOCKWISE_BIND_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `STOCKWISE_DEAD_STOCK_DAYS`: days without a sale before stock is dead (default 60)

use std::net::SocketAddr;

use stockwise_inventory::{DEFAULT_DEAD_STOCK_DAYS, StatusClassifier};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub dead_stock_days: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            dead_stock_days: DEFAULT_DEAD_STOCK_DAYS,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults
    /// with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = match lookup("STOCKWISE_BIND_ADDR") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "STOCKWISE_BIND_ADDR is not a socket address; using {DEFAULT_BIND_ADDR}");
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let dead_stock_days = match lookup("STOCKWISE_DEAD_STOCK_DAYS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if days > 0 && chrono::TimeDelta::try_days(days).is_some() => days,
                _ => {
                    tracing::warn!(value = %raw, "STOCKWISE_DEAD_STOCK_DAYS must be a positive number of days within range; using default");
                    defaults.dead_stock_days
                }
            },
            None => defaults.dead_stock_days,
        };

        Self {
            bind_addr,
            dead_stock_days,
        }
    }

    pub fn with_dead_stock_days(mut self, days: i64) -> Self {
        self.dead_stock_days = days;
        self
    }

    pub fn classifier(&self) -> StatusClassifier {
        StatusClassifier::new().with_dead_after_days(self.dead_stock_days)
    }
}
