use kurbo::Point;

use crate::scene::model::{Layout, Transform};

/// Top-left of the axis-aligned bounds of `layout` under `transform`.
///
/// All four corners are mapped because a rotation or skew can move any of them to the
/// minimum.
pub(crate) fn frame_origin(layout: Layout, transform: Transform) -> (f64, f64) {
    let rect = layout.to_rect();
    let affine = transform.to_affine();
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ];
    corners
        .into_iter()
        .map(|p| affine * p)
        .fold((f64::INFINITY, f64::INFINITY), |(nx, ny), p| {
            (nx.min(p.x), ny.min(p.y))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/geometry.rs"]
mod tests;
