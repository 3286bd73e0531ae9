//! Schema-driven protobuf decoding.
//!
//! The SVGA message layout is embedded as a protobufjs-style JSON descriptor and resolved
//! once per process. Decoding walks the wire stream against it and yields a generic
//! [`value::Value`] tree.

pub(crate) mod decode;
pub(crate) mod descriptor;
pub mod value;

use std::sync::OnceLock;

use crate::foundation::error::{SvgaError, SvgaResult};
use descriptor::Schema;

/// Full name of the container root message.
pub(crate) const MOVIE_ENTITY: &str = "com.opensource.svga.MovieEntity";

const SVGA_DESCRIPTOR: &str = include_str!("svga.json");

/// The resolved SVGA schema, parsed on first use.
pub(crate) fn svga_schema() -> SvgaResult<&'static Schema> {
    static SCHEMA: OnceLock<Result<Schema, String>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| Schema::from_json(SVGA_DESCRIPTOR).map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| SvgaError::schema(e.clone()))
}

/// Decode inflated container bytes into the generic value tree.
pub(crate) fn decode_movie(bytes: &[u8]) -> SvgaResult<value::Value> {
    decode::decode_message(svga_schema()?, MOVIE_ENTITY, bytes)
}
