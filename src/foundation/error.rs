/// Convenience result type used across animlab.
pub type AnimlabResult<T> = Result<T, AnimlabError>;

/// Top-level error taxonomy used by the animation APIs.
///
/// Degenerate geometry (for example a zoom step that scales the source below one pixel) is never
/// reported here; compositor primitives recover from it locally.
#[derive(thiserror::Error, Debug)]
pub enum AnimlabError {
    /// Invalid caller-provided request data (duration, fps, image, effect parameters).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The effect identifier does not name an entry of the effect catalog.
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    /// An encoder rejected the frame sequence or failed while producing the artifact.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AnimlabError {
    /// Build an [`AnimlabError::InvalidParameter`] value.
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build an [`AnimlabError::UnknownEffect`] value.
    pub fn unknown_effect(id: impl Into<String>) -> Self {
        Self::UnknownEffect(id.into())
    }

    /// Build an [`AnimlabError::Encoding`] value.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
