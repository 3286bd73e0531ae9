use serde::{Serialize, Serializer};

use crate::foundation::coerce::{enum_code, number_or_zero};
use crate::foundation::error::SvgaResult;
use crate::foundation::record::{Fields, optional_record, optional_string, record};
use crate::scene::model::Transform;
use crate::schema::value::Value;
use crate::shape::style::{ShapeStyle, normalize_style, serialize_code};

/// Canonical shape tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Code 0: free-form path.
    Shape,
    /// Code 1: rectangle.
    Rect,
    /// Code 2: ellipse.
    Ellipse,
    /// Code 3: reuse the previous frame's shapes.
    Keep,
    /// Any other code, serialized as the raw number.
    Unrecognized(f64),
}

impl ShapeKind {
    /// Map a raw type code.
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 {
            Self::Shape
        } else if code == 1.0 {
            Self::Rect
        } else if code == 2.0 {
            Self::Ellipse
        } else if code == 3.0 {
            Self::Keep
        } else {
            Self::Unrecognized(code)
        }
    }
}

impl Serialize for ShapeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Shape => serializer.serialize_str("shape"),
            Self::Rect => serializer.serialize_str("rect"),
            Self::Ellipse => serializer.serialize_str("ellipse"),
            Self::Keep => serializer.serialize_str("keep"),
            Self::Unrecognized(code) => serialize_code(*code, serializer),
        }
    }
}

/// Geometry payload of a shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathArgs {
    /// Path data for [`ShapeKind::Shape`].
    Shape(ShapeArgs),
    /// Rectangle for [`ShapeKind::Rect`].
    Rect(RectArgs),
    /// Ellipse for [`ShapeKind::Ellipse`].
    Ellipse(EllipseArgs),
    /// Generic `args` record of an unrecognized shape type, passed through.
    Raw(Value),
}

/// SVG-style path data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeArgs {
    /// Path commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
}

/// Rectangle geometry; absent fields read as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RectArgs {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Corner radius.
    pub corner_radius: f64,
}

/// Ellipse geometry; absent fields read as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EllipseArgs {
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
}

/// One canonical shape of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeEntity {
    /// Shape tag.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Geometry; never set for [`ShapeKind::Keep`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_args: Option<PathArgs>,
    /// Paint style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<ShapeStyle>,
    /// Shape-local transform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

fn shape_args(rec: &Fields, ctx: &str) -> SvgaResult<ShapeArgs> {
    Ok(ShapeArgs {
        d: optional_string(rec, "d", ctx)?,
    })
}

fn rect_args(rec: &Fields) -> RectArgs {
    RectArgs {
        x: number_or_zero(rec.get("x")),
        y: number_or_zero(rec.get("y")),
        width: number_or_zero(rec.get("width")),
        height: number_or_zero(rec.get("height")),
        corner_radius: number_or_zero(rec.get("cornerRadius")),
    }
}

fn ellipse_args(rec: &Fields) -> EllipseArgs {
    EllipseArgs {
        x: number_or_zero(rec.get("x")),
        y: number_or_zero(rec.get("y")),
        radius_x: number_or_zero(rec.get("radiusX")),
        radius_y: number_or_zero(rec.get("radiusY")),
    }
}

fn path_args(kind: ShapeKind, rec: &Fields, ctx: &str) -> SvgaResult<Option<PathArgs>> {
    let args = match kind {
        ShapeKind::Keep => None,
        ShapeKind::Shape => match optional_record(rec, "shape", ctx)? {
            Some(r) => Some(PathArgs::Shape(shape_args(r, &format!("{ctx}.shape"))?)),
            None => None,
        },
        ShapeKind::Rect => optional_record(rec, "rect", ctx)?.map(|r| PathArgs::Rect(rect_args(r))),
        ShapeKind::Ellipse => {
            optional_record(rec, "ellipse", ctx)?.map(|r| PathArgs::Ellipse(ellipse_args(r)))
        }
        ShapeKind::Unrecognized(_) => match rec.get("args") {
            None | Some(Value::Null) => None,
            Some(v) => Some(PathArgs::Raw(v.clone())),
        },
    };
    Ok(args)
}

/// Canonicalize one raw shape record.
pub(crate) fn canonicalize_shape(raw: &Value, ctx: &str) -> SvgaResult<ShapeEntity> {
    let rec = record(raw, ctx)?;
    let kind = ShapeKind::from_code(enum_code(rec.get("type")));
    let styles = optional_record(rec, "styles", ctx)?
        .map(|s| normalize_style(s, &format!("{ctx}.styles")))
        .transpose()?;
    let transform = optional_record(rec, "transform", ctx)?.map(|t| Transform::from_record(Some(t)));
    Ok(ShapeEntity {
        kind,
        path_args: path_args(kind, rec, ctx)?,
        styles,
        transform,
    })
}

/// Canonicalize a frame's raw shape list, preserving order.
pub(crate) fn canonicalize_shapes(raw: &[Value], ctx: &str) -> SvgaResult<Vec<ShapeEntity>> {
    raw.iter()
        .enumerate()
        .map(|(i, item)| canonicalize_shape(item, &format!("{ctx}[{i}]")))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/shape/canonical.rs"]
mod tests;
