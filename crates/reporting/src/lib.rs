//! Reporting: derived, transient view-models over product and movement snapshots.
//!
//! Everything here is a pure function of its input. Nothing is persisted and
//! every call recomputes from scratch, so the same snapshot always yields the
//! same output.

pub mod category;
pub mod dashboard;
pub mod low_stock;
pub mod monthly;
pub mod movements;
pub mod stock_value;
pub mod table;

pub use category::{CategoryBucket, CategoryTotals, UNCATEGORIZED, aggregate_by_category, category_buckets};
pub use dashboard::{DashboardSummary, RECENT_MOVEMENTS_LIMIT, StatusCounts};
pub use low_stock::{LowStockLine, LowStockReport};
pub use monthly::{
    MonthlyBucket, MonthlyReport, MonthlyReportRow, MonthlySummary, MovementGroup, MovementGroupKey,
    aggregate_monthly, aggregate_monthly_value, group_movements, normalize_groups,
};
pub use movements::MovementReport;
pub use stock_value::{StockValueLine, StockValueReport};
pub use table::{ProductPage, ProductQuery, ProductRow};
