//! Seam for a host build tool that loads `.svga` files as modules.
//!
//! The host hands over a module id (a file path) and, on file changes, the freshly read
//! bytes. Any textual source the host may have produced for the file is ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::emit::EmitOpts;
use crate::foundation::error::{SvgaError, SvgaResult};
use crate::pipeline::{svga_bytes_to_module, svga_to_module};

/// Loader configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOpts {
    /// File extension handled by the loader, without the dot.
    pub extension: String,
    /// Pretty-print the emitted JSON.
    pub pretty: bool,
}

impl Default for LoaderOpts {
    fn default() -> Self {
        Self {
            extension: "svga".to_owned(),
            pretty: false,
        }
    }
}

/// Converts matching files into `export default` modules.
#[derive(Debug, Clone, Default)]
pub struct SvgaLoader {
    opts: LoaderOpts,
}

impl SvgaLoader {
    /// Create a loader.
    pub fn new(opts: LoaderOpts) -> Self {
        Self { opts }
    }

    /// Active configuration.
    pub fn opts(&self) -> &LoaderOpts {
        &self.opts
    }

    fn emit_opts(&self) -> EmitOpts {
        EmitOpts {
            pretty: self.opts.pretty,
        }
    }

    /// Whether `id` names a file this loader handles. The comparison is case-sensitive.
    pub fn matches(&self, id: &str) -> bool {
        id.strip_suffix(self.opts.extension.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }

    /// Transform hook. Returns `None` for ids this loader does not handle.
    ///
    /// The raw bytes are re-read from `id`; `_source` is the host's text decoding of the
    /// file and is not usable for binary input.
    #[tracing::instrument(skip(self, _source))]
    pub fn transform(&self, id: &str, _source: &str) -> Option<SvgaResult<String>> {
        if !self.matches(id) {
            return None;
        }
        Some(svga_to_module(Path::new(id), &self.emit_opts()).map_err(|e| attribute(id, e)))
    }

    /// Hot-update hook. `read` supplies the file's current bytes in place of any cached
    /// content. Returns `None` for files this loader does not handle.
    #[tracing::instrument(skip(self, read))]
    pub fn hot_update<F>(&self, file: &str, read: F) -> Option<SvgaResult<String>>
    where
        F: FnOnce() -> std::io::Result<Vec<u8>>,
    {
        if !self.matches(file) {
            return None;
        }
        let result = read()
            .map_err(|e| SvgaError::io(file, e))
            .and_then(|raw| {
                svga_bytes_to_module(file, &raw, &self.emit_opts()).map_err(|e| attribute(file, e))
            });
        Some(result)
    }
}

/// Tag a decode failure with the file it came from. IO errors already carry their path.
fn attribute(id: &str, err: SvgaError) -> SvgaError {
    match err {
        SvgaError::Io { .. } => err,
        other => SvgaError::Other(anyhow::Error::new(other).context(format!("load '{id}'"))),
    }
}

#[cfg(test)]
#[path = "../tests/unit/loader.rs"]
mod tests;
