//! Message descriptors loaded from a protobufjs-style JSON document.
//!
//! The document nests namespaces, messages and enums under `nested`; messages list their
//! `fields` with `type`, `id`, optional `rule: "repeated"` and, for map fields, `keyType`.
//! Loading flattens everything into full names and resolves each field's type reference
//! with protobuf scoping (innermost enclosing scope first).

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::foundation::error::{SvgaError, SvgaResult};
use crate::wire::reader::WireType;

#[derive(Debug, Default, Deserialize)]
struct NodeDef {
    #[serde(default)]
    nested: BTreeMap<String, NodeDef>,
    #[serde(default)]
    fields: Option<BTreeMap<String, FieldDef>>,
    #[serde(default)]
    values: Option<BTreeMap<String, i64>>,
}

#[derive(Debug, Deserialize)]
struct FieldDef {
    #[serde(rename = "type")]
    ty: String,
    id: u32,
    #[serde(default)]
    rule: Option<String>,
    #[serde(default, rename = "keyType")]
    key_type: Option<String>,
}

/// Scalar wire types known to protobuf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarType {
    Double,
    Float,
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Fixed32,
    Fixed64,
    SFixed32,
    SFixed64,
    Bool,
    String,
    Bytes,
}

impl ScalarType {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "double" => Self::Double,
            "float" => Self::Float,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "sint32" => Self::SInt32,
            "sint64" => Self::SInt64,
            "fixed32" => Self::Fixed32,
            "fixed64" => Self::Fixed64,
            "sfixed32" => Self::SFixed32,
            "sfixed64" => Self::SFixed64,
            "bool" => Self::Bool,
            "string" => Self::String,
            "bytes" => Self::Bytes,
            _ => return None,
        })
    }

    pub(crate) fn wire_type(self) -> WireType {
        match self {
            Self::Double | Self::Fixed64 | Self::SFixed64 => WireType::Fixed64,
            Self::Float | Self::Fixed32 | Self::SFixed32 => WireType::Fixed32,
            Self::String | Self::Bytes => WireType::Len,
            _ => WireType::Varint,
        }
    }
}

/// What a field holds once its type reference is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Scalar(ScalarType),
    Enum,
    /// Full name of the referenced message.
    Message(String),
}

impl FieldKind {
    pub(crate) fn wire_type(&self) -> WireType {
        match self {
            Self::Scalar(s) => s.wire_type(),
            Self::Enum => WireType::Varint,
            Self::Message(_) => WireType::Len,
        }
    }

    /// Repeated fields of these kinds may arrive packed into one length-delimited run.
    pub(crate) fn is_packable(&self) -> bool {
        match self {
            Self::Scalar(s) => !matches!(s, ScalarType::String | ScalarType::Bytes),
            Self::Enum => true,
            Self::Message(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Label {
    Singular,
    Repeated,
    Map { key: ScalarType },
}

#[derive(Debug, Clone)]
pub(crate) struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) number: u32,
    pub(crate) label: Label,
    pub(crate) kind: FieldKind,
}

#[derive(Debug, Clone)]
pub(crate) struct MessageDescriptor {
    pub(crate) full_name: String,
    fields: HashMap<u32, FieldDescriptor>,
}

impl MessageDescriptor {
    pub(crate) fn field(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.get(&number)
    }

    pub(crate) fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }
}

/// A resolved set of message types, addressed by full name.
#[derive(Debug, Clone)]
pub(crate) struct Schema {
    messages: HashMap<String, MessageDescriptor>,
}

enum TypeEntry {
    Message,
    Enum,
}

impl Schema {
    /// Parse and resolve a descriptor document.
    pub(crate) fn from_json(json: &str) -> SvgaResult<Self> {
        let root: NodeDef = serde_json::from_str(json)
            .map_err(|e| SvgaError::schema(format!("parse descriptor JSON: {e}")))?;

        let mut types = HashMap::new();
        let mut pending = Vec::new();
        collect(&root, "", &mut types, &mut pending);

        let mut messages = HashMap::with_capacity(pending.len());
        for (full_name, field_defs) in pending {
            let mut fields = HashMap::with_capacity(field_defs.len());
            for (name, def) in field_defs {
                let field = resolve_field(&full_name, name, def, &types)?;
                if fields.insert(field.number, field).is_some() {
                    return Err(SvgaError::schema(format!(
                        "{full_name}: duplicate field number {}",
                        def.id
                    )));
                }
            }
            messages.insert(full_name.clone(), MessageDescriptor { full_name, fields });
        }

        Ok(Self { messages })
    }

    pub(crate) fn message(&self, full_name: &str) -> SvgaResult<&MessageDescriptor> {
        self.messages
            .get(full_name)
            .ok_or_else(|| SvgaError::schema(format!("unknown message type '{full_name}'")))
    }
}

fn join(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_owned()
    } else {
        format!("{scope}.{name}")
    }
}

fn collect<'a>(
    node: &'a NodeDef,
    scope: &str,
    types: &mut HashMap<String, TypeEntry>,
    pending: &mut Vec<(String, &'a BTreeMap<String, FieldDef>)>,
) {
    for (name, child) in &node.nested {
        let full = join(scope, name);
        if let Some(fields) = &child.fields {
            types.insert(full.clone(), TypeEntry::Message);
            pending.push((full.clone(), fields));
        } else if child.values.is_some() {
            types.insert(full.clone(), TypeEntry::Enum);
        }
        collect(child, &full, types, pending);
    }
}

fn resolve_type(
    scope: &str,
    reference: &str,
    types: &HashMap<String, TypeEntry>,
) -> Option<(String, bool)> {
    let lookup = |name: &str| {
        types
            .get(name)
            .map(|t| (name.to_owned(), matches!(t, TypeEntry::Enum)))
    };

    if let Some(absolute) = reference.strip_prefix('.') {
        return lookup(absolute);
    }

    let mut scope = scope;
    loop {
        if let Some(hit) = lookup(&join(scope, reference)) {
            return Some(hit);
        }
        if scope.is_empty() {
            return None;
        }
        scope = scope.rsplit_once('.').map_or("", |(parent, _)| parent);
    }
}

fn resolve_field(
    message: &str,
    name: &str,
    def: &FieldDef,
    types: &HashMap<String, TypeEntry>,
) -> SvgaResult<FieldDescriptor> {
    if def.id == 0 {
        return Err(SvgaError::schema(format!("{message}.{name}: field id 0")));
    }

    let kind = match ScalarType::parse(&def.ty) {
        Some(s) => FieldKind::Scalar(s),
        None => match resolve_type(message, &def.ty, types) {
            Some((_, true)) => FieldKind::Enum,
            Some((full, false)) => FieldKind::Message(full),
            None => {
                return Err(SvgaError::schema(format!(
                    "{message}.{name}: unresolved type '{}'",
                    def.ty
                )));
            }
        },
    };

    let label = match (&def.key_type, def.rule.as_deref()) {
        (Some(key), _) => {
            let key = ScalarType::parse(key)
                .filter(|k| !matches!(k, ScalarType::Float | ScalarType::Double | ScalarType::Bytes))
                .ok_or_else(|| {
                    SvgaError::schema(format!("{message}.{name}: invalid map key type '{key}'"))
                })?;
            Label::Map { key }
        }
        (None, Some("repeated")) => Label::Repeated,
        (None, None | Some("optional") | Some("required")) => Label::Singular,
        (None, Some(other)) => {
            return Err(SvgaError::schema(format!(
                "{message}.{name}: unknown rule '{other}'"
            )));
        }
    };

    Ok(FieldDescriptor {
        name: name.to_owned(),
        number: def.id,
        label,
        kind,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/schema/descriptor.rs"]
mod tests;
