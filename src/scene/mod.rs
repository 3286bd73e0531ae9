//! Normalized scene graph: video, sprites, frames.

pub(crate) mod builder;
pub(crate) mod geometry;
pub(crate) mod model;

pub use model::{FrameEntity, Layout, MaskPath, MaskStyle, SpriteEntity, Transform, VideoEntity, VideoSize};
