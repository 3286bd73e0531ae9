//! Shape and paint-style canonicalization.
//!
//! Raw shape records become tagged [`ShapeEntity`] values, styles are normalized to positional
//! colors and a composite dash pattern, and frames that signal reuse are resolved against the
//! call-local [`reuse::ShapeCache`].

pub(crate) mod canonical;
pub(crate) mod reuse;
pub(crate) mod style;

use std::sync::Arc;

pub use canonical::{EllipseArgs, PathArgs, RectArgs, ShapeArgs, ShapeEntity, ShapeKind};
pub use style::{LineCap, LineJoin, ShapeStyle};

/// A frame's shape list. Frames that reuse shapes hold a clone of the same `Arc`.
pub type ShapeList = Arc<Vec<ShapeEntity>>;
