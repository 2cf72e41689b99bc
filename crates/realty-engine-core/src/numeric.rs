//! Coercion of raw field values into finite decimals, plus the rounding and
//! guarded-division primitives every formula in the engine is built on.
//!
//! Nothing in this module can fail: malformed input collapses to zero.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Raw values
// ---------------------------------------------------------------------------

/// A scalar field as supplied by a form, a record, or a JSON document.
///
/// JSON `null` and absent fields deserialize to [`RawValue::Missing`];
/// numbers become [`RawValue::Number`]; strings stay as text until
/// [`to_number`] parses them.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawValue {
    #[default]
    Missing,
    Number(Decimal),
    Float(f64),
    Text(String),
}

impl RawValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }
}

impl From<Decimal> for RawValue {
    fn from(v: Decimal) -> Self {
        RawValue::Number(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float(v)
    }
}

impl From<f32> for RawValue {
    fn from(v: f32) -> Self {
        RawValue::Float(v as f64)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Number(Decimal::from(v))
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Number(Decimal::from(v))
    }
}

impl From<u32> for RawValue {
    fn from(v: u32) -> Self {
        RawValue::Number(Decimal::from(v))
    }
}

impl From<u64> for RawValue {
    fn from(v: u64) -> Self {
        RawValue::Number(Decimal::from(v))
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<&RawValue> for RawValue {
    fn from(v: &RawValue) -> Self {
        v.clone()
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Missing, Into::into)
    }
}

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Missing => serializer.serialize_none(),
            RawValue::Number(d) => Serialize::serialize(d, serializer),
            RawValue::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            RawValue::Float(f) => serializer.serialize_str(&f.to_string()),
            RawValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => RawValue::Missing,
            // Go through the literal text so 0.08 stays exactly 0.08
            serde_json::Value::Number(n) => {
                let literal = n.to_string();
                match parse_decimal(&literal) {
                    Some(d) => RawValue::Number(d),
                    None => RawValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                }
            }
            serde_json::Value::String(s) => RawValue::Text(s),
            other => RawValue::Text(other.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Coerce any raw value into a finite decimal.
///
/// Missing values, text that is not a number, and non-finite floats all
/// become zero. So do finite floats and numeric text whose magnitude is
/// beyond `Decimal`'s range (about 7.9e28), such as `1e30`.
pub fn to_number(v: impl Into<RawValue>) -> Decimal {
    match v.into() {
        RawValue::Missing => Decimal::ZERO,
        RawValue::Number(d) => d,
        RawValue::Float(f) if f.is_finite() => Decimal::from_f64(f).unwrap_or(Decimal::ZERO),
        RawValue::Float(_) => Decimal::ZERO,
        RawValue::Text(s) => parse_decimal(&s).unwrap_or(Decimal::ZERO),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Round half away from zero to `decimals` places.
pub fn round(n: Decimal, decimals: u32) -> Decimal {
    n.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// [`round`] for `f64` callers. Non-finite input yields zero.
pub fn round_f64(n: f64, decimals: u32) -> f64 {
    if !n.is_finite() {
        return 0.0;
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (n * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}

/// Divide, returning `fallback` when the denominator is not positive or the
/// quotient would overflow.
pub fn guarded_div(numerator: Decimal, denominator: Decimal, fallback: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return fallback;
    }
    numerator.checked_div(denominator).unwrap_or(fallback)
}

/// `numerator / denominator` as a percentage, zero on a degenerate
/// denominator.
pub(crate) fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    guarded_div(numerator, denominator, Decimal::ZERO)
        .checked_mul(dec!(100))
        .unwrap_or(Decimal::ZERO)
}

/// Keep `value` when strictly positive; otherwise fall back to `default`.
///
/// The flag is `true` when the default was used.
pub fn positive_or(value: Decimal, default: Decimal) -> (Decimal, bool) {
    if value > Decimal::ZERO {
        (value, false)
    } else {
        (default, true)
    }
}

/// Keep `value` when it is a fraction in (0, 1]; otherwise fall back to
/// `default`.
///
/// The flag is `true` when the default was used.
pub fn fraction_or(value: Decimal, default: Decimal) -> (Decimal, bool) {
    if value > Decimal::ZERO && value <= Decimal::ONE {
        (value, false)
    } else {
        (default, true)
    }
}
