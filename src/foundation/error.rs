/// Convenience result type used across sprig.
pub type SprigResult<T> = Result<T, SprigError>;

/// Top-level error taxonomy used by boundary APIs.
///
/// The reconciler and the draw path never produce these: they skip bad entries and keep going.
#[derive(thiserror::Error, Debug)]
pub enum SprigError {
    /// Invalid configuration or a violated scene-graph invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A structural scene-graph call whose preconditions do not hold.
    #[error("structure error: {0}")]
    Structure(String),

    /// Update messages that cannot be decoded at all.
    #[error("message error: {0}")]
    Message(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Raster surface setup or readback failures.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SprigError {
    /// Build a [`SprigError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SprigError::Structure`] value.
    pub fn structure(msg: impl Into<String>) -> Self {
        Self::Structure(msg.into())
    }

    /// Build a [`SprigError::Message`] value.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }

    /// Build a [`SprigError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`SprigError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for SprigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
