//! Scalar coercion for loosely-typed decoded fields.
//!
//! Every scalar the scene builder reads goes through one of these functions, so each
//! default is applied in exactly one place and never raises.

use crate::schema::value::Value;

/// Numeric view of a decoded scalar.
///
/// Absent fields and non-scalar values are NaN, `null` is 0, booleans are 0/1, and strings
/// parse after trimming (an empty string is 0, anything unparsable is NaN).
pub(crate) fn number(v: Option<&Value>) -> f64 {
    match v {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Int(i)) => *i as f64,
        Some(Value::UInt(u)) => *u as f64,
        Some(Value::Float(f)) => *f,
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Bytes(_) | Value::List(_) | Value::Map(_)) => f64::NAN,
    }
}

/// `number(v)`, falling back to `default` when the result is zero or NaN.
pub(crate) fn or_default(v: Option<&Value>, default: f64) -> f64 {
    let n = number(v);
    if n.is_nan() || n == 0.0 { default } else { n }
}

/// Integer flavour of [`or_default`]; fractional parts are truncated.
pub(crate) fn int_or_default(v: Option<&Value>, default: i64) -> i64 {
    let n = or_default(v, default as f64);
    let t = n.trunc();
    if t == 0.0 { default } else { t as i64 }
}

/// `number(v)` with NaN collapsed to zero.
pub(crate) fn number_or_zero(v: Option<&Value>) -> f64 {
    let n = number(v);
    if n.is_nan() { 0.0 } else { n }
}

/// The value only when it is already numeric; no string or boolean conversion.
pub(crate) fn typed_number(v: Option<&Value>) -> Option<f64> {
    match v {
        Some(Value::Int(i)) => Some(*i as f64),
        Some(Value::UInt(u)) => Some(*u as f64),
        Some(Value::Float(f)) => Some(*f),
        _ => None,
    }
}

/// Raw code of an enum-like field. Absent fields read as the proto3 default `0`.
pub(crate) fn enum_code(v: Option<&Value>) -> f64 {
    match v {
        None => 0.0,
        Some(v) => number(Some(v)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/coerce.rs"]
mod tests;
