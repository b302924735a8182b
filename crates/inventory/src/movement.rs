//! Stock movement log.
//!
//! A movement is a single inbound (`IN`) or outbound (`OUT`) inventory
//! transaction. Movements are never edited; the log only grows.

use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use stockwise_core::coerce::{self, lenient};
use stockwise_core::{DomainError, DomainResult, Entity, MovementId, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum MovementType {
    In,
    Out,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "IN",
            MovementType::Out => "OUT",
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" => Ok(MovementType::In),
            "OUT" => Ok(MovementType::Out),
            other => Err(DomainError::validation(format!("unknown movement type: {other}"))),
        }
    }
}

impl TryFrom<String> for MovementType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One entry of the stock movement log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    #[serde(rename = "_id", alias = "id")]
    pub id: MovementId,
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub kind: MovementType,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(deserialize_with = "required_timestamp")]
    pub created_at: DateTime<Utc>,
}

fn required_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
    let v = JsonValue::deserialize(d)?;
    coerce::timestamp(Some(&v)).ok_or_else(|| serde::de::Error::custom("createdAt is not a timestamp"))
}

impl StockMovement {
    pub fn new(
        id: MovementId,
        product_id: ProductId,
        kind: MovementType,
        quantity: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            kind,
            quantity,
            note: None,
            created_at,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Parse one movement from untyped JSON.
    ///
    /// Quantities must be positive; a movement of zero or fewer units is not a
    /// transaction.
    pub fn from_json(value: &JsonValue) -> DomainResult<Self> {
        let movement: StockMovement = serde_json::from_value(value.clone())
            .map_err(|e| DomainError::validation(format!("stock movement: {e}")))?;
        if movement.quantity <= 0 {
            return Err(DomainError::validation("stock movement quantity must be positive"));
        }
        Ok(movement)
    }

    /// Quantity signed by direction (`IN` adds, `OUT` removes).
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementType::In => self.quantity,
            MovementType::Out => self.quantity.saturating_neg(),
        }
    }
}

impl Entity for StockMovement {
    type Id = MovementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Normalize a movement list fetched from the backend.
///
/// A non-array payload yields an empty list; unreadable elements are skipped.
pub fn normalize_movements(value: &JsonValue) -> Vec<StockMovement> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match StockMovement::from_json(item) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed stock movement");
                None
            }
        })
        .collect()
}

/// Report filter: inclusive date range plus optional direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: Option<MovementType>,
}

impl MovementFilter {
    pub fn matches(&self, movement: &StockMovement) -> bool {
        let day = movement.created_at.date_naive();
        self.start_date.is_none_or(|start| day >= start)
            && self.end_date.is_none_or(|end| day <= end)
            && self.kind.is_none_or(|kind| movement.kind == kind)
    }
}

/// Append-only movement log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovementLog {
    entries: Vec<StockMovement>,
}

impl MovementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, movement: StockMovement) {
        self.entries.push(movement);
    }

    pub fn entries(&self) -> &[StockMovement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// History for one product, newest first.
    pub fn history(&self, product_id: &ProductId) -> Vec<&StockMovement> {
        let mut out: Vec<_> = self.entries.iter().filter(|m| &m.product_id == product_id).collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn filtered(&self, filter: &MovementFilter) -> Vec<&StockMovement> {
        self.entries.iter().filter(|m| filter.matches(m)).collect()
    }

    /// Net quantity change recorded for one product.
    pub fn net_change(&self, product_id: &ProductId) -> i64 {
        self.entries
            .iter()
            .filter(|m| &m.product_id == product_id)
            .fold(0i64, |acc, m| acc.saturating_add(m.signed_quantity()))
    }

    /// The `limit` most recent entries across all products, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&StockMovement> {
        let mut out: Vec<_> = self.entries.iter().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out.truncate(limit);
        out
    }
}

impl FromIterator<StockMovement> for MovementLog {
    fn from_iter<I: IntoIterator<Item = StockMovement>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn movement(id: &str, product: &str, kind: MovementType, qty: i64, day: u32) -> StockMovement {
        StockMovement::new(
            MovementId::new(id).unwrap(),
            ProductId::new(product).unwrap(),
            kind,
            qty,
            Utc.with_ymd_and_hms(2024, 1, day, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn parses_backend_shape() {
        let m = StockMovement::from_json(&json!({
            "_id": "m1",
            "productId": "p1",
            "type": "OUT",
            "quantity": 4,
            "note": "sold",
            "createdAt": "2024-01-05T09:30:00Z"
        }))
        .unwrap();

        assert_eq!(m.kind, MovementType::Out);
        assert_eq!(m.signed_quantity(), -4);
        assert_eq!(m.note.as_deref(), Some("sold"));
        assert_eq!(m.created_at, Utc.with_ymd_and_hms(2024, 1, 5, 9, 30, 0).unwrap());
    }

    #[test]
    fn rejects_unknown_type_and_non_positive_quantity() {
        let base = json!({"_id": "m", "productId": "p", "createdAt": "2024-01-01"});

        let mut bad_type = base.clone();
        bad_type["type"] = json!("SIDEWAYS");
        bad_type["quantity"] = json!(1);
        assert!(StockMovement::from_json(&bad_type).is_err());

        let mut zero = base.clone();
        zero["type"] = json!("IN");
        zero["quantity"] = json!(0);
        assert!(matches!(StockMovement::from_json(&zero), Err(DomainError::Validation(_))));
    }

    #[test]
    fn movement_type_is_case_insensitive() {
        assert_eq!("in".parse::<MovementType>().unwrap(), MovementType::In);
        let m: MovementType = serde_json::from_value(json!("out")).unwrap();
        assert_eq!(m, MovementType::Out);
        assert_eq!(serde_json::to_value(MovementType::In).unwrap(), json!("IN"));
    }

    #[test]
    fn normalize_skips_invalid_records() {
        let list = normalize_movements(&json!([
            {"_id": "m1", "productId": "p", "type": "IN", "quantity": 3, "createdAt": "2024-01-01"},
            {"_id": "m2", "productId": "p", "type": "IN", "quantity": 3},
            "garbage"
        ]));
        assert_eq!(list.len(), 1);
        assert!(normalize_movements(&json!("nope")).is_empty());
    }

    #[test]
    fn filter_is_inclusive_on_both_ends() {
        let filter = MovementFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 5),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 10),
            kind: Some(MovementType::In),
        };

        assert!(filter.matches(&movement("a", "p", MovementType::In, 1, 5)));
        assert!(filter.matches(&movement("b", "p", MovementType::In, 1, 10)));
        assert!(!filter.matches(&movement("c", "p", MovementType::In, 1, 11)));
        assert!(!filter.matches(&movement("d", "p", MovementType::Out, 1, 7)));
        assert!(MovementFilter::default().matches(&movement("e", "p", MovementType::Out, 1, 1)));
    }

    #[test]
    fn log_tracks_history_and_net_change() {
        let mut log = MovementLog::new();
        log.append(movement("1", "p", MovementType::In, 10, 1));
        log.append(movement("2", "p", MovementType::Out, 3, 4));
        log.append(movement("3", "q", MovementType::In, 7, 2));

        let p = ProductId::new("p").unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log.net_change(&p), 7);

        let history: Vec<_> = log.history(&p).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(history, vec!["2", "1"]);
    }

    #[test]
    fn recent_is_newest_first_and_capped() {
        let log: MovementLog = [
            movement("1", "p", MovementType::In, 1, 3),
            movement("2", "q", MovementType::Out, 1, 9),
            movement("3", "p", MovementType::In, 1, 6),
        ]
        .into_iter()
        .collect();

        let ids: Vec<_> = log.recent(2).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(log.recent(10).len(), 3);
    }

    #[test]
    fn net_change_saturates_on_extreme_quantities() {
        let mut log = MovementLog::new();
        log.append(movement("1", "p", MovementType::Out, i64::MAX, 1));
        log.append(movement("2", "p", MovementType::Out, i64::MAX, 2));
        log.append(movement("3", "p", MovementType::Out, i64::MIN, 3));

        assert_eq!(log.entries()[2].signed_quantity(), i64::MAX);
        // MIN (saturated) + MAX
        assert_eq!(log.net_change(&ProductId::new("p").unwrap()), -1);
    }
}
