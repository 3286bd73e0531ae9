use serde::{Serialize, Serializer};

use crate::foundation::coerce::{enum_code, number, number_or_zero, typed_number};
use crate::foundation::error::SvgaResult;
use crate::foundation::record::{Fields, optional_list, optional_record};

/// Normalized paint style of one shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    /// Fill color as positional `[r, g, b, a]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<[f64; 4]>,
    /// Stroke color as positional `[r, g, b, a]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<[f64; 4]>,
    /// Stroke width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Stroke end cap.
    pub line_cap: LineCap,
    /// Stroke corner join.
    pub line_join: LineJoin,
    /// Miter limit for [`LineJoin::Miter`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub miter_limit: Option<f64>,
    /// Alternating on/off dash lengths; empty means solid.
    pub line_dash: Vec<f64>,
}

/// Stroke end cap. Codes outside 0..=2 are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCap {
    /// Code 0.
    Butt,
    /// Code 1.
    Round,
    /// Code 2.
    Square,
    /// Any other code, serialized as the raw number.
    Unrecognized(f64),
}

impl LineCap {
    /// Map a raw code.
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 {
            Self::Butt
        } else if code == 1.0 {
            Self::Round
        } else if code == 2.0 {
            Self::Square
        } else {
            Self::Unrecognized(code)
        }
    }
}

impl Serialize for LineCap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Butt => serializer.serialize_str("butt"),
            Self::Round => serializer.serialize_str("round"),
            Self::Square => serializer.serialize_str("square"),
            Self::Unrecognized(code) => serialize_code(*code, serializer),
        }
    }
}

/// Stroke corner join. Codes outside 0..=2 are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineJoin {
    /// Code 0.
    Miter,
    /// Code 1.
    Round,
    /// Code 2.
    Bevel,
    /// Any other code, serialized as the raw number.
    Unrecognized(f64),
}

impl LineJoin {
    /// Map a raw code.
    pub fn from_code(code: f64) -> Self {
        if code == 0.0 {
            Self::Miter
        } else if code == 1.0 {
            Self::Round
        } else if code == 2.0 {
            Self::Bevel
        } else {
            Self::Unrecognized(code)
        }
    }
}

impl Serialize for LineJoin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Miter => serializer.serialize_str("miter"),
            Self::Round => serializer.serialize_str("round"),
            Self::Bevel => serializer.serialize_str("bevel"),
            Self::Unrecognized(code) => serialize_code(*code, serializer),
        }
    }
}

/// Integral codes go out as integers so they read back exactly as they came in.
pub(crate) fn serialize_code<S: Serializer>(code: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if code.is_finite() && code.fract() == 0.0 && code.abs() < 9.0e15 {
        serializer.serialize_i64(code as i64)
    } else {
        serializer.serialize_f64(code)
    }
}

const CHANNELS: [&str; 4] = ["r", "g", "b", "a"];
const POSITIONS: [&str; 4] = ["0", "1", "2", "3"];

/// Positional `[r, g, b, a]` for a color record.
///
/// Each named channel that is numeric overwrites its index; the others keep whatever the
/// record already held positionally, or 0.0.
pub(crate) fn color_channels(rec: &Fields) -> [f64; 4] {
    let mut out = [0.0; 4];
    for (i, slot) in out.iter_mut().enumerate() {
        if let Some(existing) = typed_number(rec.get(POSITIONS[i])) {
            *slot = existing;
        }
        if let Some(named) = typed_number(rec.get(CHANNELS[i])) {
            *slot = named;
        }
    }
    out
}

/// Assemble a dash pattern from the three independently supplied lengths.
///
/// The steps are order dependent: I appends; II pads one leading zero when the pattern is
/// empty, then appends itself and a trailing zero; III pads two zeros when fewer than two
/// entries exist and then lands at index 2, replacing whatever is there.
pub(crate) fn dash_pattern(mut dash: Vec<f64>, i: f64, ii: f64, iii: f64) -> Vec<f64> {
    if i > 0.0 {
        dash.push(i);
    }
    if ii > 0.0 {
        if dash.is_empty() {
            dash.push(0.0);
        }
        dash.push(ii);
        dash.push(0.0);
    }
    if iii > 0.0 {
        if dash.len() < 2 {
            dash.push(0.0);
            dash.push(0.0);
        }
        match dash.get_mut(2) {
            Some(slot) => *slot = iii,
            None => dash.push(iii),
        }
    }
    dash
}

/// Normalize a raw `ShapeStyle` record.
pub(crate) fn normalize_style(rec: &Fields, ctx: &str) -> SvgaResult<ShapeStyle> {
    let fill = optional_record(rec, "fill", ctx)?.map(color_channels);
    let stroke = optional_record(rec, "stroke", ctx)?.map(color_channels);

    let seed = optional_list(rec, "lineDash", ctx)?
        .map(|items| items.iter().map(|v| number_or_zero(Some(v))).collect())
        .unwrap_or_default();
    let line_dash = dash_pattern(
        seed,
        number(rec.get("lineDashI")),
        number(rec.get("lineDashII")),
        number(rec.get("lineDashIII")),
    );

    Ok(ShapeStyle {
        fill,
        stroke,
        stroke_width: rec.get("strokeWidth").map(|v| number_or_zero(Some(v))),
        line_cap: LineCap::from_code(enum_code(rec.get("lineCap"))),
        line_join: LineJoin::from_code(enum_code(rec.get("lineJoin"))),
        miter_limit: rec.get("miterLimit").map(|v| number_or_zero(Some(v))),
        line_dash,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/shape/style.rs"]
mod tests;
