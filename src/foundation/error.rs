/// Convenience result type used across stagekit.
pub type StageResult<T> = Result<T, StageError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Structural errors abort a render call; content-level edge cases (empty
/// silhouettes, fully transparent layers) are not errors anywhere in the
/// engine and degrade to zero-valued outputs instead.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// Zero-sized canvas, subject, or resize target.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Paired buffers (subject image and mask) have different sizes.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid user-provided configuration or spec data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Build a [`StageError::InvalidDimensions`] value.
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Build a [`StageError::DimensionMismatch`] value.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`StageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
