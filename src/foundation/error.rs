/// Convenience result type used across the crate.
pub type ViewfinderResult<T> = Result<T, ViewfinderError>;

/// Top-level error taxonomy.
///
/// Runtime scheduling and overlay resolution never fail; they clamp or no-op instead. Errors
/// only surface while loading page descriptions or building geometry from invalid input.
#[derive(thiserror::Error, Debug)]
pub enum ViewfinderError {
    /// Page configuration that cannot be normalised into something renderable.
    #[error("config error: {0}")]
    Config(String),

    /// Geometry that cannot be laid out (non-finite sizes, non-positive aspect ratios).
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors when serializing or deserializing page descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ViewfinderError {
    /// Build a [`ViewfinderError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ViewfinderError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`ViewfinderError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ViewfinderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
