/// Convenience result type used across slidegen.
pub type SlideResult<T> = Result<T, SlideError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Most stages recover internally (fallback plan, provider fall-through, placeholder export);
/// these variants describe what went wrong when a stage does report a failure.
#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    /// Invalid caller-provided data or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The planning collaborator failed or returned an unusable plan.
    #[error("planning error: {0}")]
    Planning(String),

    /// An asset provider could not produce an image.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while assembling or writing the slide document.
    #[error("render error: {0}")]
    Render(String),

    /// Errors raised by a raster bridge during export.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    /// Build a [`SlideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideError::Planning`] value.
    pub fn planning(msg: impl Into<String>) -> Self {
        Self::Planning(msg.into())
    }

    /// Build a [`SlideError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`SlideError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SlideError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`SlideError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SlideError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
