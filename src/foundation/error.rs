/// Convenience result type used across cuesync.
pub type CueResult<T> = Result<T, CueError>;

/// Error taxonomy for the strict (fallible) entry points.
///
/// The synchronization operations themselves never fail; they return empty results or
/// `None` for text that is mid-edit. Errors only surface where a caller explicitly asks
/// for a strict parse.
#[derive(thiserror::Error, Debug)]
pub enum CueError {
    /// Invalid user-provided data (bad path string, missing envelope field, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing scene JSON.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CueError {
    /// Build a [`CueError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CueError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CueError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
