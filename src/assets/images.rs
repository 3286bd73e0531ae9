use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::foundation::error::{SvgaError, SvgaResult};
use crate::schema::value::Value;

/// Rewrite the container's `images` table in place, encoding every raw blob as base64.
///
/// Keys are untouched and entries that are already text pass through, so downstream
/// consumers only ever see strings. Returns the number of entries in the table.
pub(crate) fn normalize_images(container: &mut Value) -> SvgaResult<usize> {
    let Some(fields) = container.as_map_mut() else {
        return Err(SvgaError::violation(format!(
            "container must be a map, got {}",
            container.kind_name()
        )));
    };
    let Some(images) = fields.get_mut("images") else {
        return Ok(0);
    };
    let Value::Map(entries) = images else {
        return Err(SvgaError::violation(format!(
            "images must be a map, got {}",
            images.kind_name()
        )));
    };

    for (key, entry) in entries.iter_mut() {
        match entry {
            Value::Bytes(raw) => {
                let encoded = BASE64_STANDARD.encode(raw);
                *entry = Value::String(encoded);
            }
            Value::String(_) => {}
            other => {
                return Err(SvgaError::violation(format!(
                    "image '{key}' must be bytes, got {}",
                    other.kind_name()
                )));
            }
        }
    }
    Ok(entries.len())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/images.rs"]
mod tests;
