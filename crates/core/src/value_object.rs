//! Value object trait: equality by value, not identity.
//!
//! Report buckets, statuses and summaries are value objects: they are derived
//! fresh on every call and two of them with the same fields are the same value.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct MonthlyBucket {
///     month: String,
///     in_qty: i64,
///     out_qty: i64,
/// }
///
/// impl ValueObject for MonthlyBucket {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
