use std::path::PathBuf;

/// Convenience result type used across the decoder.
pub type SvgaResult<T> = Result<T, SvgaError>;

/// Top-level error taxonomy. Every variant is fatal to the decode call that raised it.
#[derive(thiserror::Error, Debug)]
pub enum SvgaError {
    /// Corrupt or incomplete zlib stream.
    #[error("inflate error: {0}")]
    Inflate(String),

    /// Bytes do not conform to the protobuf wire format or the message schema.
    #[error("decode error: {0}")]
    Decode(String),

    /// A structurally required record is missing or has the wrong shape.
    #[error("schema violation: {0}")]
    SchemaViolation(String),

    /// The embedded message descriptor itself is malformed.
    #[error("schema error: {0}")]
    Schema(String),

    /// Errors when serializing the entity tree.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Reading the container from disk failed.
    #[error("read '{}': {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgaError {
    /// Build a [`SvgaError::Inflate`] value.
    pub fn inflate(msg: impl Into<String>) -> Self {
        Self::Inflate(msg.into())
    }

    /// Build a [`SvgaError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SvgaError::SchemaViolation`] value.
    pub fn violation(msg: impl Into<String>) -> Self {
        Self::SchemaViolation(msg.into())
    }

    /// Build a [`SvgaError::Schema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`SvgaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`SvgaError::Io`] value tagged with the offending path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
