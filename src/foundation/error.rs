/// Convenience result type used across cardreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by crate APIs.
///
/// Timeline evaluation itself never fails once a configuration has been validated; these
/// variants cover construction, loading and previews.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building a trigger schedule or keyframe curve.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Errors while evaluating composition state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Malformed or unusable dataset records.
    #[error("data error: {0}")]
    Data(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`ReelError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ReelError::Data`] value.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
