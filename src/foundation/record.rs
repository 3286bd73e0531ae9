//! Structural access to decoded records.
//!
//! Unlike scalar coercion, a record or list with the wrong shape is a
//! [`SvgaError::SchemaViolation`]: the scene graph is never built from a partial tree.

use std::collections::BTreeMap;

use crate::foundation::error::{SvgaError, SvgaResult};
use crate::schema::value::Value;

pub(crate) type Fields = BTreeMap<String, Value>;

/// Borrow `v` as a record; `ctx` names it in the error.
pub(crate) fn record<'a>(v: &'a Value, ctx: &str) -> SvgaResult<&'a Fields> {
    v.as_map().ok_or_else(|| {
        SvgaError::violation(format!("{ctx}: expected a record, got {}", v.kind_name()))
    })
}

/// Optional sub-record. Absent and `null` are `None`.
pub(crate) fn optional_record<'a>(
    fields: &'a Fields,
    key: &str,
    ctx: &str,
) -> SvgaResult<Option<&'a Fields>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => record(v, &format!("{ctx}.{key}")).map(Some),
    }
}

/// Optional repeated field. Absent and `null` are `None`.
pub(crate) fn optional_list<'a>(
    fields: &'a Fields,
    key: &str,
    ctx: &str,
) -> SvgaResult<Option<&'a [Value]>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_list().map(Some).ok_or_else(|| {
            SvgaError::violation(format!(
                "{ctx}.{key}: expected a list, got {}",
                v.kind_name()
            ))
        }),
    }
}

/// Optional text field. Absent and `null` are `None`.
pub(crate) fn optional_string(fields: &Fields, key: &str, ctx: &str) -> SvgaResult<Option<String>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v) => Err(SvgaError::violation(format!(
            "{ctx}.{key}: expected a string, got {}",
            v.kind_name()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/record.rs"]
mod tests;
