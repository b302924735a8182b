//! Stock movement report: the filtered log plus its totals.

use serde::{Deserialize, Serialize};

use stockwise_inventory::{MovementFilter, MovementLog, MovementType, StockMovement};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementReport {
    pub total_movements: usize,
    pub total_in: i64,
    pub total_out: i64,
    pub net_change: i64,
    /// Matching movements, newest first.
    pub movements: Vec<StockMovement>,
}

impl MovementReport {
    pub fn build(log: &MovementLog, filter: &MovementFilter) -> Self {
        let mut movements: Vec<StockMovement> = log.filtered(filter).into_iter().cloned().collect();
        movements.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let (total_in, total_out) = movements.iter().fold((0i64, 0i64), |(i, o), m| match m.kind {
            MovementType::In => (i.saturating_add(m.quantity), o),
            MovementType::Out => (i, o.saturating_add(m.quantity)),
        });

        Self {
            total_movements: movements.len(),
            total_in,
            total_out,
            net_change: total_in.saturating_sub(total_out),
            movements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use stockwise_core::{MovementId, ProductId};

    fn movement(id: &str, kind: MovementType, qty: i64, day: u32) -> StockMovement {
        StockMovement::new(
            MovementId::new(id).unwrap(),
            ProductId::new("p").unwrap(),
            kind,
            qty,
            Utc.with_ymd_and_hms(2024, 4, day, 12, 0, 0).unwrap(),
        )
    }

    fn log() -> MovementLog {
        [
            movement("a", MovementType::In, 10, 1),
            movement("b", MovementType::Out, 4, 8),
            movement("c", MovementType::In, 6, 15),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn totals_over_whole_log() {
        let report = MovementReport::build(&log(), &MovementFilter::default());
        assert_eq!(report.total_movements, 3);
        assert_eq!(report.total_in, 16);
        assert_eq!(report.total_out, 4);
        assert_eq!(report.net_change, 12);

        let ids: Vec<_> = report.movements.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn totals_follow_the_filter() {
        let filter = MovementFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 4, 5),
            ..MovementFilter::default()
        };
        let report = MovementReport::build(&log(), &filter);
        assert_eq!(report.total_movements, 2);
        assert_eq!(report.net_change, 2);
    }

    #[test]
    fn serializes_report_fields() {
        let json = serde_json::to_value(MovementReport::build(&MovementLog::new(), &MovementFilter::default())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"totalMovements": 0, "totalIn": 0, "totalOut": 0, "netChange": 0, "movements": []})
        );
    }
}
