use std::collections::BTreeMap;

use crate::foundation::error::{SvgaError, SvgaResult};
use crate::schema::descriptor::{
    FieldDescriptor, FieldKind, Label, MessageDescriptor, ScalarType, Schema,
};
use crate::schema::value::Value;
use crate::wire::reader::{WireReader, WireType};

/// Deepest message nesting accepted before the input is considered hostile.
pub(crate) const MAX_DEPTH: usize = 64;

/// Decode `bytes` as one `type_name` message.
pub(crate) fn decode_message(schema: &Schema, type_name: &str, bytes: &[u8]) -> SvgaResult<Value> {
    let desc = schema.message(type_name)?;
    let fields = decode_fields(schema, desc, &mut WireReader::new(bytes), 0)?;
    Ok(Value::Map(fields))
}

fn decode_fields(
    schema: &Schema,
    desc: &MessageDescriptor,
    r: &mut WireReader<'_>,
    depth: usize,
) -> SvgaResult<BTreeMap<String, Value>> {
    if depth >= MAX_DEPTH {
        return Err(SvgaError::decode(format!(
            "{}: message nesting deeper than {MAX_DEPTH}",
            desc.full_name
        )));
    }

    let mut out = BTreeMap::new();
    let mut lists = BTreeMap::<String, Vec<Value>>::new();
    let mut maps = BTreeMap::<String, BTreeMap<String, Value>>::new();

    // Repeated and map fields always decode, empty when nothing is on the wire.
    for field in desc.fields() {
        match field.label {
            Label::Repeated => {
                lists.insert(field.name.clone(), Vec::new());
            }
            Label::Map { .. } => {
                maps.insert(field.name.clone(), BTreeMap::new());
            }
            Label::Singular => {}
        }
    }

    while !r.is_empty() {
        let (number, wire_type) = r.read_key()?;
        let Some(field) = desc.field(number) else {
            r.skip(number, wire_type)?;
            continue;
        };

        match &field.label {
            Label::Singular => {
                let v = read_value(schema, desc, field, &field.kind, wire_type, r, depth)?;
                out.insert(field.name.clone(), v);
            }
            Label::Repeated => {
                let items = lists.entry(field.name.clone()).or_default();
                if wire_type == WireType::Len && field.kind.is_packable() {
                    let mut packed = WireReader::new(r.read_len_delimited()?);
                    while !packed.is_empty() {
                        items.push(read_value(
                            schema,
                            desc,
                            field,
                            &field.kind,
                            field.kind.wire_type(),
                            &mut packed,
                            depth,
                        )?);
                    }
                } else {
                    items.push(read_value(
                        schema, desc, field, &field.kind, wire_type, r, depth,
                    )?);
                }
            }
            Label::Map { key } => {
                expect_wire_type(desc, field, WireType::Len, wire_type)?;
                let (k, v) = read_map_entry(schema, desc, field, *key, r, depth)?;
                maps.entry(field.name.clone()).or_default().insert(k, v);
            }
        }
    }

    out.extend(lists.into_iter().map(|(k, v)| (k, Value::List(v))));
    out.extend(maps.into_iter().map(|(k, v)| (k, Value::Map(v))));
    Ok(out)
}

fn expect_wire_type(
    desc: &MessageDescriptor,
    field: &FieldDescriptor,
    expected: WireType,
    got: WireType,
) -> SvgaResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(SvgaError::decode(format!(
            "{}.{} (field {}): expected wire type {expected:?}, got {got:?}",
            desc.full_name, field.name, field.number
        )))
    }
}

fn read_value(
    schema: &Schema,
    desc: &MessageDescriptor,
    field: &FieldDescriptor,
    kind: &FieldKind,
    wire_type: WireType,
    r: &mut WireReader<'_>,
    depth: usize,
) -> SvgaResult<Value> {
    expect_wire_type(desc, field, kind.wire_type(), wire_type)?;
    match kind {
        FieldKind::Scalar(s) => read_scalar(*s, r).map_err(|e| annotate(desc, field, e)),
        FieldKind::Enum => Ok(Value::Int(i64::from(r.read_varint()? as i32))),
        FieldKind::Message(name) => {
            let sub = schema.message(name)?;
            let bytes = r.read_len_delimited()?;
            let fields = decode_fields(schema, sub, &mut WireReader::new(bytes), depth + 1)?;
            Ok(Value::Map(fields))
        }
    }
}

fn annotate(desc: &MessageDescriptor, field: &FieldDescriptor, err: SvgaError) -> SvgaError {
    match err {
        SvgaError::Decode(msg) => {
            SvgaError::decode(format!("{}.{}: {msg}", desc.full_name, field.name))
        }
        other => other,
    }
}

fn read_scalar(ty: ScalarType, r: &mut WireReader<'_>) -> SvgaResult<Value> {
    Ok(match ty {
        ScalarType::Double => Value::Float(f64::from_bits(r.read_fixed64()?)),
        ScalarType::Float => Value::Float(f64::from(f32::from_bits(r.read_fixed32()?))),
        ScalarType::Int32 => Value::Int(i64::from(r.read_varint()? as i32)),
        ScalarType::Int64 => Value::Int(r.read_varint()? as i64),
        ScalarType::UInt32 => Value::UInt(u64::from(r.read_varint()? as u32)),
        ScalarType::UInt64 => Value::UInt(r.read_varint()?),
        ScalarType::SInt32 => {
            let n = r.read_varint()? as u32;
            Value::Int(i64::from((n >> 1) as i32 ^ -((n & 1) as i32)))
        }
        ScalarType::SInt64 => {
            let n = r.read_varint()?;
            Value::Int((n >> 1) as i64 ^ -((n & 1) as i64))
        }
        ScalarType::Fixed32 => Value::UInt(u64::from(r.read_fixed32()?)),
        ScalarType::Fixed64 => Value::UInt(r.read_fixed64()?),
        ScalarType::SFixed32 => Value::Int(i64::from(r.read_fixed32()? as i32)),
        ScalarType::SFixed64 => Value::Int(r.read_fixed64()? as i64),
        ScalarType::Bool => Value::Bool(r.read_varint()? != 0),
        ScalarType::String => {
            let at = r.position();
            let bytes = r.read_len_delimited()?;
            let s = std::str::from_utf8(bytes).map_err(|e| {
                SvgaError::decode(format!("invalid UTF-8 string at offset {at}: {e}"))
            })?;
            Value::String(s.to_owned())
        }
        ScalarType::Bytes => Value::Bytes(r.read_len_delimited()?.to_vec()),
    })
}

fn default_scalar(ty: ScalarType) -> Value {
    match ty {
        ScalarType::Double | ScalarType::Float => Value::Float(0.0),
        ScalarType::UInt32 | ScalarType::UInt64 | ScalarType::Fixed32 | ScalarType::Fixed64 => {
            Value::UInt(0)
        }
        ScalarType::Bool => Value::Bool(false),
        ScalarType::String => Value::String(String::new()),
        ScalarType::Bytes => Value::Bytes(Vec::new()),
        _ => Value::Int(0),
    }
}

fn map_key(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("{other:?}"),
    }
}

/// One `map<K, V>` entry: an implicit message with the key at field 1 and the value at
/// field 2. Missing halves take their type's default.
fn read_map_entry(
    schema: &Schema,
    desc: &MessageDescriptor,
    field: &FieldDescriptor,
    key_ty: ScalarType,
    r: &mut WireReader<'_>,
    depth: usize,
) -> SvgaResult<(String, Value)> {
    let mut entry = WireReader::new(r.read_len_delimited()?);
    let mut key = None;
    let mut value = None;

    while !entry.is_empty() {
        let (number, wire_type) = entry.read_key()?;
        match number {
            1 => {
                expect_wire_type(desc, field, key_ty.wire_type(), wire_type)?;
                key = Some(read_scalar(key_ty, &mut entry).map_err(|e| annotate(desc, field, e))?);
            }
            2 => {
                value = Some(read_value(
                    schema,
                    desc,
                    field,
                    &field.kind,
                    wire_type,
                    &mut entry,
                    depth,
                )?);
            }
            _ => entry.skip(number, wire_type)?,
        }
    }

    let key = key.unwrap_or_else(|| default_scalar(key_ty));
    let value = match value {
        Some(v) => v,
        None => match &field.kind {
            FieldKind::Scalar(s) => default_scalar(*s),
            FieldKind::Enum => Value::Int(0),
            FieldKind::Message(_) => Value::Map(BTreeMap::new()),
        },
    };
    Ok((map_key(key), value))
}

#[cfg(test)]
#[path = "../../tests/unit/schema/decode.rs"]
mod tests;
