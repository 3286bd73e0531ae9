use std::collections::BTreeMap;

use crate::foundation::coerce::{int_or_default, number_or_zero, or_default};
use crate::foundation::error::{SvgaError, SvgaResult};
use crate::foundation::record::{Fields, optional_list, optional_record, optional_string, record};
use crate::scene::geometry::frame_origin;
use crate::scene::model::{
    FrameEntity, Layout, MaskPath, SpriteEntity, Transform, VideoEntity, VideoSize,
};
use crate::schema::value::Value;
use crate::shape::canonical::canonicalize_shapes;
use crate::shape::reuse::ShapeCache;

const DEFAULT_FPS: i64 = 20;

/// Build the scene graph from a decoded container.
///
/// Shape reuse is resolved against a cache owned by this call alone.
pub(crate) fn build_video(container: &Value) -> SvgaResult<VideoEntity> {
    let root = record(container, "movie")?;
    let images = image_table(root)?;

    let mut video = VideoEntity {
        version: None,
        images,
        video_size: VideoSize::default(),
        fps: None,
        frames: None,
        audios: passthrough(root.get("audios")),
        sprites: Vec::new(),
    };

    if let Some(params) = optional_record(root, "params", "movie")? {
        video.version = passthrough(root.get("version"));
        video.video_size = VideoSize {
            width: Some(or_default(params.get("viewBoxWidth"), 0.0)),
            height: Some(or_default(params.get("viewBoxHeight"), 0.0)),
        };
        video.fps = Some(int_or_default(params.get("fps"), DEFAULT_FPS));
        video.frames = Some(int_or_default(params.get("frames"), 0));
    }

    let mut cache = ShapeCache::new();
    if let Some(sprites) = optional_list(root, "sprites", "movie")? {
        video.sprites = sprites
            .iter()
            .enumerate()
            .map(|(i, raw)| build_sprite(raw, &mut cache, &format!("sprites[{i}]")))
            .collect::<SvgaResult<_>>()?;
    }

    tracing::debug!(
        sprites = video.sprites.len(),
        images = video.images.len(),
        "built scene graph"
    );
    Ok(video)
}

fn passthrough(v: Option<&Value>) -> Option<Value> {
    match v {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.clone()),
    }
}

/// The image table, already base64 text after image normalization.
fn image_table(root: &Fields) -> SvgaResult<BTreeMap<String, String>> {
    let Some(images) = optional_record(root, "images", "movie")? else {
        return Ok(BTreeMap::new());
    };
    images
        .iter()
        .map(|(key, entry)| match entry {
            Value::String(s) => Ok((key.clone(), s.clone())),
            other => Err(SvgaError::violation(format!(
                "movie.images.{key}: expected normalized text, got {}",
                other.kind_name()
            ))),
        })
        .collect()
}

fn build_sprite(
    raw: &Value,
    cache: &mut ShapeCache,
    ctx: &str,
) -> SvgaResult<SpriteEntity> {
    let rec = record(raw, ctx)?;
    let frames = match optional_list(rec, "frames", ctx)? {
        Some(frames) => frames
            .iter()
            .enumerate()
            .map(|(i, f)| build_frame(f, cache, &format!("{ctx}.frames[{i}]")))
            .collect::<SvgaResult<_>>()?,
        None => Vec::new(),
    };
    Ok(SpriteEntity {
        matte_key: optional_string(rec, "matteKey", ctx)?,
        image_key: optional_string(rec, "imageKey", ctx)?,
        frames,
    })
}

fn build_frame(
    raw: &Value,
    cache: &mut ShapeCache,
    ctx: &str,
) -> SvgaResult<FrameEntity> {
    let rec = record(raw, ctx)?;
    let layout = Layout::from_record(optional_record(rec, "layout", ctx)?);
    let transform = Transform::from_record(optional_record(rec, "transform", ctx)?);
    let mask_path = optional_string(rec, "clipPath", ctx)?
        .filter(|d| !d.is_empty())
        .map(MaskPath::from_clip_path);

    let shapes = match optional_list(rec, "shapes", ctx)? {
        Some(items) => {
            let shapes_ctx = format!("{ctx}.shapes");
            let canonical = canonicalize_shapes(items, &shapes_ctx)?;
            Some(cache.resolve(canonical, &shapes_ctx)?)
        }
        None => None,
    };

    let (nx, ny) = frame_origin(layout, transform);
    Ok(FrameEntity {
        alpha: number_or_zero(rec.get("alpha")),
        layout,
        transform,
        mask_path,
        shapes,
        nx,
        ny,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builder.rs"]
mod tests;
