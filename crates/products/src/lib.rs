//! Products domain module.
//!
//! Read-only snapshots of catalog products as served by the inventory backend,
//! normalized at the boundary into a narrow, typed shape (no IO, no HTTP, no
//! storage).

pub mod export;
pub mod product;

pub use export::{ExportError, export_csv};
pub use product::{Product, normalize_products};
