use std::collections::BTreeMap;

use kurbo::{Affine, Rect};
use serde::Serialize;

use crate::foundation::coerce::or_default;
use crate::foundation::record::Fields;
use crate::schema::value::Value;
use crate::shape::ShapeList;

/// Normalized scene root.
///
/// `version`, both `video_size` dimensions, `fps` and `frames` are only set when the
/// container carries a `params` block; otherwise they stay `None` and are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoEntity {
    /// Container format version, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
    /// Image key to base64-encoded image bytes.
    pub images: BTreeMap<String, String>,
    /// Viewport size.
    pub video_size: VideoSize,
    /// Frames per second (default 20).
    #[serde(rename = "FPS", skip_serializing_if = "Option::is_none")]
    pub fps: Option<i64>,
    /// Total frame count (default 0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<i64>,
    /// Audio records, passed through untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audios: Option<Value>,
    /// Layers in paint order.
    pub sprites: Vec<SpriteEntity>,
}

/// Viewport size in container units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct VideoSize {
    /// Viewport width (default 0.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Viewport height (default 0.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// One animated layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteEntity {
    /// Key of the sprite used as this layer's alpha mask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matte_key: Option<String>,
    /// Key into [`VideoEntity::images`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
    /// One entry per timeline tick.
    pub frames: Vec<FrameEntity>,
}

/// One timeline sample of a sprite.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEntity {
    /// Opacity; NaN and absent values read as 0.0.
    pub alpha: f64,
    /// Layout rectangle.
    pub layout: Layout,
    /// Affine transform applied to the layout.
    pub transform: Transform,
    /// Clip mask, present when the frame declares a non-empty clip path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_path: Option<MaskPath>,
    /// Shapes drawn in this frame. Frames that signal reuse share the previous list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<ShapeList>,
    /// Minimum x over the transformed layout corners.
    pub nx: f64,
    /// Minimum y over the transformed layout corners.
    pub ny: f64,
}

/// Axis-aligned layout rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Layout {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Layout {
    /// Build from a raw `Layout` record; every field defaults to 0.0 on its own.
    pub(crate) fn from_record(rec: Option<&Fields>) -> Self {
        let Some(rec) = rec else {
            return Self::default();
        };
        Self {
            x: or_default(rec.get("x"), 0.0),
            y: or_default(rec.get("y"), 0.0),
            width: or_default(rec.get("width"), 0.0),
            height: or_default(rec.get("height"), 0.0),
        }
    }

    /// The rectangle spanned by this layout. Negative extents are kept as-is.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// 2D affine matrix `[a b c d tx ty]`: `x' = a·x + c·y + tx`, `y' = b·x + d·y + ty`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    /// x scale.
    pub a: f64,
    /// y shear.
    pub b: f64,
    /// x shear.
    pub c: f64,
    /// y scale.
    pub d: f64,
    /// x translation.
    pub tx: f64,
    /// y translation.
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

impl Transform {
    /// Build from a raw `Transform` record.
    ///
    /// Each coefficient falls back independently: `a` and `d` to 1.0, the rest to 0.0.
    /// A zero `a` or `d` therefore reads as 1.0.
    pub(crate) fn from_record(rec: Option<&Fields>) -> Self {
        let Some(rec) = rec else {
            return Self::default();
        };
        Self {
            a: or_default(rec.get("a"), 1.0),
            b: or_default(rec.get("b"), 0.0),
            c: or_default(rec.get("c"), 0.0),
            d: or_default(rec.get("d"), 1.0),
            tx: or_default(rec.get("tx"), 0.0),
            ty: or_default(rec.get("ty"), 0.0),
        }
    }

    /// The equivalent kurbo affine map.
    pub fn to_affine(self) -> Affine {
        Affine::new([self.a, self.b, self.c, self.d, self.tx, self.ty])
    }
}

/// Clip mask built from a frame's clip path.
///
/// Serialized as `{"_d": <path>, "_styles": {"fill": "#000000"}}`: the path data with no
/// transform of its own, filled black.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskPath {
    /// SVG-style path data.
    #[serde(rename = "_d")]
    pub d: String,
    /// Fill used when rasterizing the mask.
    #[serde(rename = "_styles")]
    pub styles: MaskStyle,
}

/// Paint style of a clip mask.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskStyle {
    /// CSS color literal.
    pub fill: String,
}

impl MaskPath {
    pub(crate) fn from_clip_path(d: String) -> Self {
        Self {
            d,
            styles: MaskStyle {
                fill: "#000000".to_owned(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
