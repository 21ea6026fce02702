/// Convenience result type used across wallgen.
pub type WallgenResult<T> = Result<T, WallgenError>;

/// Top-level error taxonomy for the generation pipeline.
///
/// Every variant aborts the whole request; nothing in the pipeline retries on its own.
#[derive(thiserror::Error, Debug)]
pub enum WallgenError {
    /// Invalid configuration or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A source image is missing or could not be decoded.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// A resize could not reach its target dimensions (usually a source that is too small).
    #[error("scaling error: {0}")]
    Scaling(String),

    /// A perspective transform is degenerate or cannot be inverted.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Reading or writing an output file failed.
    #[error("io error: {0}")]
    Io(String),

    /// Errors when serializing or deserializing configuration and presets.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallgenError {
    /// Build a [`WallgenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WallgenError::SourceNotFound`] value.
    pub fn source_not_found(msg: impl Into<String>) -> Self {
        Self::SourceNotFound(msg.into())
    }

    /// Build a [`WallgenError::Scaling`] value.
    pub fn scaling(msg: impl Into<String>) -> Self {
        Self::Scaling(msg.into())
    }

    /// Build a [`WallgenError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`WallgenError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Build a [`WallgenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Guidance text suitable for showing to an end user.
    ///
    /// Details stay in the log; the user only learns what to change before trying again.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) => "Source image could not be found!",
            Self::Scaling(_) => {
                "The source image could not be scaled. This may occur for very small images. \
                 Try a different source image or scaling method."
            }
            Self::Io(_) => "IO error generating images. Check file permissions.",
            Self::Validation(_) | Self::Serde(_) => {
                "The selected settings are invalid. Check the configuration and try again."
            }
            Self::Geometry(_) | Self::Other(_) => {
                "An unanticipated error has occurred. See log file for details."
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
