/// Convenience result type used across the crate.
pub type SdfResult<T> = Result<T, SdfError>;

/// Top-level error taxonomy for scene construction, encoding and rendering.
///
/// Distance evaluation itself is total and never returns an error; malformed
/// operation graphs evaluate to NaN instead (see the evaluator docs).
#[derive(thiserror::Error, Debug)]
pub enum SdfError {
    /// Invalid caller-provided data (bad object index, bad raster size, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A scene stream that does not follow the binary container layout.
    #[error("format error: {0}")]
    Format(String),

    /// Underlying file I/O failure while loading or storing a scene.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SdfError {
    /// Build a [`SdfError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SdfError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
