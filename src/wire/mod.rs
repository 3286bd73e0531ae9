//! Byte-level plumbing below the schema: zlib inflation and protobuf wire primitives.

pub(crate) mod inflate;
pub(crate) mod reader;
