//! `stockwise-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, opaque identifiers handed out by the inventory backend, and
//! the lenient numeric coercion every boundary type shares.

pub mod coerce;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{MovementId, NotificationId, ProductId};
pub use value_object::ValueObject;
