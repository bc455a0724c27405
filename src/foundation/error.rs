/// Convenience result type used across linefig.
pub type FigResult<T> = Result<T, FigError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum FigError {
    /// Invalid user-provided input (unknown field id, out-of-range count).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration that cannot be interpreted at all.
    #[error("config error: {0}")]
    Config(String),

    /// Dataset loading or shape problems.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// A figure could not be compiled into a trace set.
    #[error("compile error: {0}")]
    Compile(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The render target never became available within the wait budget.
    #[error("target not found: '{target}' after {waited_ms}ms")]
    TargetNotFound {
        /// Identifier of the awaited target.
        target: String,
        /// Milliseconds spent waiting.
        waited_ms: u64,
    },

    /// The charting library never became available within the wait budget.
    #[error("library unavailable: not ready after {waited_ms}ms")]
    LibraryUnavailable {
        /// Milliseconds spent waiting.
        waited_ms: u64,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FigError {
    /// Build a [`FigError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FigError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FigError::Dataset`] value.
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Build a [`FigError::Compile`] value.
    pub fn compile(msg: impl Into<String>) -> Self {
        Self::Compile(msg.into())
    }

    /// Build a [`FigError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
