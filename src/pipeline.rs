//! End-to-end entry points: raw container bytes to scene graph to module payload.

use std::path::Path;

use crate::assets::images::normalize_images;
use crate::emit::module::emit_module;
use crate::emit::EmitOpts;
use crate::foundation::error::{SvgaError, SvgaResult};
use crate::scene::builder::build_video;
use crate::scene::model::VideoEntity;
use crate::schema::decode_movie;
use crate::schema::value::Value;
use crate::wire::inflate::inflate;

/// Decode inflated container bytes into the generic value tree, with images as base64.
pub fn parse(bytes: &[u8]) -> SvgaResult<Value> {
    let mut container = decode_movie(bytes)?;
    let images = normalize_images(&mut container)?;
    tracing::debug!(bytes = bytes.len(), images, "decoded container");
    Ok(container)
}

/// Decode a raw (compressed) container into its scene graph.
///
/// An empty buffer has no scene and yields `Ok(None)`.
#[tracing::instrument(skip(raw), fields(raw_len = raw.len()))]
pub fn decode(raw: &[u8]) -> SvgaResult<Option<VideoEntity>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let inflated = inflate(raw)?;
    tracing::debug!(inflated = inflated.len(), "inflated container");
    let container = parse(&inflated)?;
    build_video(&container).map(Some)
}

/// Decode `raw` and wrap the result as an `export default` module.
///
/// `id` only names the source in diagnostics.
#[tracing::instrument(skip(raw, opts), fields(raw_len = raw.len()))]
pub fn svga_bytes_to_module(id: &str, raw: &[u8], opts: &EmitOpts) -> SvgaResult<String> {
    let video = decode(raw)?;
    emit_module(video.as_ref(), opts)
}

/// Read `path` from disk and convert it like [`svga_bytes_to_module`].
pub fn svga_to_module(path: impl AsRef<Path>, opts: &EmitOpts) -> SvgaResult<String> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|e| SvgaError::io(path, e))?;
    svga_bytes_to_module(&path.to_string_lossy(), &raw, opts)
}
