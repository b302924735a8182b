//! Monthly stock-movement pivot.
//!
//! Input arrives pre-grouped by `{year, month, type}` with a summed quantity
//! (the backend's aggregation pipeline, or [`group_movements`] for a raw log).
//! This stage pivots IN/OUT into one row per month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use stockwise_core::ValueObject;
use stockwise_core::coerce::lenient;
use stockwise_inventory::{MovementType, StockMovement};

/// Grouping key of a pre-aggregated movement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovementGroupKey {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub year: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub month: i64,
    #[serde(rename = "type")]
    pub kind: MovementType,
}

/// `{ _id: { year, month, type }, totalQuantity }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementGroup {
    #[serde(rename = "_id")]
    pub key: MovementGroupKey,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_quantity: i64,
}

impl MovementGroup {
    pub fn new(year: i64, month: i64, kind: MovementType, total_quantity: i64) -> Self {
        Self {
            key: MovementGroupKey { year, month, kind },
            total_quantity,
        }
    }

    /// `YYYY-MM`, month zero-padded.
    pub fn month_key(&self) -> String {
        month_key(self.key.year, self.key.month)
    }
}

fn month_key(year: i64, month: i64) -> String {
    format!("{year}-{month:02}")
}

/// One month of movement totals: `{ month, in, out }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: String,
    #[serde(rename = "in")]
    pub in_qty: i64,
    #[serde(rename = "out")]
    pub out_qty: i64,
}

impl ValueObject for MonthlyBucket {}

impl MonthlyBucket {
    fn empty(month: String) -> Self {
        Self {
            month,
            in_qty: 0,
            out_qty: 0,
        }
    }

    pub fn net_change(&self) -> i64 {
        self.in_qty.saturating_sub(self.out_qty)
    }

    /// Short display label, e.g. `Jan 2024`. Falls back to the key when the
    /// key is not a valid calendar month.
    pub fn label(&self) -> String {
        NaiveDate::parse_from_str(&format!("{}-01", self.month), "%Y-%m-%d")
            .map(|d| d.format("%b %Y").to_string())
            .unwrap_or_else(|_| self.month.clone())
    }
}

/// Pivot pre-grouped rows into monthly buckets, sorted ascending by key.
///
/// Each `{year, month, type}` triple is expected to appear at most once: a
/// repeated triple overwrites the earlier total rather than adding to it.
pub fn aggregate_monthly(groups: &[MovementGroup]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<String, MonthlyBucket> = BTreeMap::new();

    for g in groups {
        let key = g.month_key();
        let bucket = buckets
            .entry(key)
            .or_insert_with_key(|k| MonthlyBucket::empty(k.clone()));
        match g.key.kind {
            MovementType::In => bucket.in_qty = g.total_quantity,
            MovementType::Out => bucket.out_qty = g.total_quantity,
        }
    }

    buckets.into_values().collect()
}

/// Read pre-grouped rows from untyped JSON.
///
/// A non-array payload yields no rows; rows that do not carry a readable
/// `_id.type` are skipped.
pub fn normalize_groups(value: &JsonValue) -> Vec<MovementGroup> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<MovementGroup>(item.clone()) {
            Ok(g) => Some(g),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed movement group");
                None
            }
        })
        .collect()
}

/// [`aggregate_monthly`] straight from untyped JSON.
pub fn aggregate_monthly_value(value: &JsonValue) -> Vec<MonthlyBucket> {
    aggregate_monthly(&normalize_groups(value))
}

/// Group a raw movement log by calendar `{year, month, type}` (UTC), summing
/// quantities. Output is ordered by year, month, then type.
pub fn group_movements(movements: &[StockMovement]) -> Vec<MovementGroup> {
    let mut sums: BTreeMap<MovementGroupKey, i64> = BTreeMap::new();

    for m in movements {
        let key = MovementGroupKey {
            year: i64::from(m.created_at.year()),
            month: i64::from(m.created_at.month()),
            kind: m.kind,
        };
        let sum = sums.entry(key).or_insert(0);
        *sum = sum.saturating_add(m.quantity);
    }

    sums.into_iter()
        .map(|(key, total_quantity)| MovementGroup { key, total_quantity })
        .collect()
}

/// Totals across all months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_in: i64,
    pub total_out: i64,
    pub net_change: i64,
}

impl ValueObject for MonthlySummary {}

impl MonthlySummary {
    pub fn from_buckets(buckets: &[MonthlyBucket]) -> Self {
        let total_in = buckets.iter().fold(0i64, |acc, b| acc.saturating_add(b.in_qty));
        let total_out = buckets.iter().fold(0i64, |acc, b| acc.saturating_add(b.out_qty));
        Self {
            total_in,
            total_out,
            net_change: total_in.saturating_sub(total_out),
        }
    }
}

/// Row of the monthly statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportRow {
    #[serde(flatten)]
    pub bucket: MonthlyBucket,
    pub month_name: String,
    pub net_change: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub months: Vec<MonthlyReportRow>,
    pub summary: MonthlySummary,
}

impl MonthlyReport {
    pub fn from_groups(groups: &[MovementGroup]) -> Self {
        Self::from_buckets(aggregate_monthly(groups))
    }

    pub fn from_buckets(buckets: Vec<MonthlyBucket>) -> Self {
        let summary = MonthlySummary::from_buckets(&buckets);
        let months = buckets
            .into_iter()
            .map(|bucket| MonthlyReportRow {
                month_name: bucket.label(),
                net_change: bucket.net_change(),
                bucket,
            })
            .collect();
        Self { months, summary }
    }
}
