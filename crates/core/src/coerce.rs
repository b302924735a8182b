//! Lenient coercion of loosely-typed JSON fields.
//!
//! The inventory backend hands out untyped JSON. Numeric fields follow one
//! rule everywhere: missing, `null` or non-numeric values count as `0`;
//! numeric strings are parsed; booleans count as `1`/`0`. Non-finite results
//! collapse to `0` as well.
//!
//! The [`lenient`] module exposes the same rules as serde `deserialize_with`
//! helpers so boundary structs can declare them per field.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

/// Coerce a JSON value to a finite `f64`.
pub fn number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() { 0.0 } else { s.parse::<f64>().unwrap_or(0.0) }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Coerce a JSON value to an integer, truncating fractions toward zero.
pub fn integer(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap_or(0),
        // `as` saturates at the i64 bounds.
        other => number(other).trunc() as i64,
    }
}

/// Like [`number`], but keeps "absent" distinct from zero.
///
/// `null`, missing and unparseable values yield `None`.
pub fn optional_number(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(_)) | Some(Value::Bool(_)) => Some(number(value)),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Parse a point in time.
///
/// Accepts RFC 3339 strings, bare `YYYY-MM-DD` dates (UTC midnight) and epoch
/// milliseconds. Anything else is treated as absent.
pub fn timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
            Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
        }
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

/// Non-blank string content, trimmed.
pub fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// serde `deserialize_with` adapters over the coercion rules above.
///
/// Pair them with `#[serde(default)]` so that absent fields take the same
/// default as `null`.
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn integer<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(super::integer(Some(&v)))
    }

    pub fn optional_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(super::optional_number(Some(&v)))
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(super::timestamp(Some(&v)))
    }

    /// Any string as-is, numbers rendered, everything else empty.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(super::text(Some(&v)))
    }
}
