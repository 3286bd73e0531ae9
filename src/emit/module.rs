use serde::{Deserialize, Serialize};

use crate::foundation::error::{SvgaError, SvgaResult};
use crate::scene::model::VideoEntity;

const EXPORT_PREFIX: &str = "export default ";
const NO_VALUE: &str = "undefined";

/// Options for rendering the module payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOpts {
    /// Indent the JSON body. The `export default` wrapper is unchanged.
    pub pretty: bool,
}

/// `export default <JSON>`, or `export default undefined` when there is no scene.
pub(crate) fn emit_module(video: Option<&VideoEntity>, opts: &EmitOpts) -> SvgaResult<String> {
    let Some(video) = video else {
        return Ok(format!("{EXPORT_PREFIX}{NO_VALUE}"));
    };
    let body = if opts.pretty {
        serde_json::to_string_pretty(video)
    } else {
        serde_json::to_string(video)
    }
    .map_err(|e| SvgaError::serde(e.to_string()))?;
    Ok(format!("{EXPORT_PREFIX}{body}"))
}

#[cfg(test)]
#[path = "../../tests/unit/emit/module.rs"]
mod tests;
