//! Inventory domain module.
//!
//! Stock status classification and the stock-movement log, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod movement;
pub mod status;

pub use movement::{MovementFilter, MovementLog, MovementType, StockMovement, normalize_movements};
pub use status::{DEFAULT_DEAD_STOCK_DAYS, StatusClassifier, StockStatus, classify};
