/// Convenience result type used across vizrender.
pub type VizResult<T> = Result<T, VizError>;

/// Top-level error taxonomy used by renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// Requested format is not valid for the object's mode.
    #[error("unsupported format: '{format}' is not valid in {mode} mode")]
    UnsupportedFormat {
        /// Format as requested (or as resolved from `auto`).
        format: String,
        /// Mode of the object being rendered.
        mode: String,
    },

    /// A validated format matched no output branch.
    #[error("unhandled format: {0}")]
    UnhandledFormat(String),

    /// The rendering runtime could not be resolved.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Entry point reserved for future support.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Malformed objects, options or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from collaborators or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    /// Build a [`VizError::UnsupportedFormat`] value.
    pub fn unsupported_format(format: impl Into<String>, mode: impl std::fmt::Display) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            mode: mode.to_string(),
        }
    }

    /// Build a [`VizError::UnhandledFormat`] value.
    pub fn unhandled_format(msg: impl Into<String>) -> Self {
        Self::UnhandledFormat(msg.into())
    }

    /// Build a [`VizError::BackendUnavailable`] value.
    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    /// Build a [`VizError::NotImplemented`] value.
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented(msg.into())
    }

    /// Build a [`VizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
