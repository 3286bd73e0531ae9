use std::sync::Arc;

use crate::foundation::error::{SvgaError, SvgaResult};
use crate::shape::ShapeList;
use crate::shape::canonical::{ShapeEntity, ShapeKind};

/// Last non-reuse shape list seen during one decode call.
///
/// A fresh cache is created per decode and threaded through the sprite and frame builders,
/// so concurrent decodes never observe each other's lists.
#[derive(Debug, Default)]
pub(crate) struct ShapeCache {
    last: Option<ShapeList>,
}

impl ShapeCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Resolve a frame's canonical shapes.
    ///
    /// A list led by [`ShapeKind::Keep`] resolves to the cached list itself; any other list
    /// is shared out and becomes the new cached list.
    pub(crate) fn resolve(&mut self, shapes: Vec<ShapeEntity>, ctx: &str) -> SvgaResult<ShapeList> {
        let keeps = shapes.first().is_some_and(|s| s.kind == ShapeKind::Keep);
        if keeps {
            let Some(last) = &self.last else {
                return Err(SvgaError::violation(format!(
                    "{ctx}: keep with no earlier shape list to reuse"
                )));
            };
            tracing::trace!(ctx, len = last.len(), "reusing previous shapes");
            return Ok(Arc::clone(last));
        }
        let list = Arc::new(shapes);
        self.last = Some(Arc::clone(&list));
        Ok(list)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/reuse.rs"]
mod tests;
