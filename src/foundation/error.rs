/// Convenience result type used across the crate.
pub type VisageResult<T> = Result<T, VisageError>;

/// Error taxonomy for timeline construction, selector parsing and configuration loading.
///
/// Animation playback itself never fails; unknown selectors reach playback only through
/// the lossy parsers, which fall back instead of erroring.
#[derive(thiserror::Error, Debug)]
pub enum VisageError {
    /// Input failed validation (bad ranges, contradictory configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// A timeline could not be built or executed as described.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Strict selector parsing met a name outside the catalogue.
    #[error("unknown {kind} selector '{value}'")]
    UnknownSelector {
        /// Channel the selector belongs to (`eye`, `mouth`, `expression`, `emote`).
        kind: &'static str,
        /// Offending input.
        value: String,
    },

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped external error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VisageError {
    /// Build a [`VisageError::Validation`] error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VisageError::Timeline`] error.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`VisageError::UnknownSelector`] error.
    pub fn unknown_selector(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownSelector {
            kind,
            value: value.into(),
        }
    }

    /// Build a [`VisageError::Serde`] error.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
