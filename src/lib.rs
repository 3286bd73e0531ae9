//! Decoder for SVGA animation containers.
//!
//! A container is a zlib-compressed protobuf `MovieEntity`. Decoding inflates it, walks the
//! wire stream against the embedded message schema, and normalizes the result into a
//! renderer-ready scene graph:
//!
//! - [`decode`] raw bytes into a [`VideoEntity`]
//! - [`svga_bytes_to_module`] / [`svga_to_module`] to get an `export default <JSON>` payload
//! - [`SvgaLoader`] for hosts that load `.svga` files as modules
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod wire;

pub(crate) mod emit;
/// Host loader seam.
pub mod loader;
/// End-to-end entry points.
pub mod pipeline;
pub(crate) mod scene;
/// Schema-driven protobuf decoding and the generic value tree.
pub mod schema;
pub(crate) mod shape;

pub use crate::emit::EmitOpts;
pub use crate::foundation::error::{SvgaError, SvgaResult};
pub use crate::loader::{LoaderOpts, SvgaLoader};
pub use crate::pipeline::{decode, parse, svga_bytes_to_module, svga_to_module};
pub use crate::scene::{
    FrameEntity, Layout, MaskPath, MaskStyle, SpriteEntity, Transform, VideoEntity, VideoSize,
};
pub use crate::schema::value::Value;
pub use crate::shape::{
    EllipseArgs, LineCap, LineJoin, PathArgs, RectArgs, ShapeArgs, ShapeEntity, ShapeKind,
    ShapeList, ShapeStyle,
};
pub use crate::wire::inflate::inflate;
