/// Convenience result type used across scrollreel.
pub type ScrollreelResult<T> = Result<T, ScrollreelError>;

/// Top-level error taxonomy used by construction and IO APIs.
///
/// Runtime playback never fails: broken frames, missing geometry and degenerate scroll ranges
/// are absorbed by the player. These errors surface only while building descriptors, parsing
/// configuration or decoding files.
#[derive(thiserror::Error, Debug)]
pub enum ScrollreelError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed frame sequence (empty, unordered ids, bad template).
    #[error("sequence error: {0}")]
    Sequence(String),

    /// An individual frame could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollreelError {
    /// Build a [`ScrollreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollreelError::Sequence`] value.
    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence(msg.into())
    }

    /// Build a [`ScrollreelError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ScrollreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
