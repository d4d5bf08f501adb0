use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the styling engine
#[derive(Error, Debug)]
pub enum StyleError {
    /// A color string is not a hex triple
    #[error("invalid color {input:?}: expected #RRGGBB or #RGB")]
    InvalidColorFormat {
        /// The rejected input
        input: String,
    },
    /// Render parameters cannot produce an image
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// The output image could not be serialized or written
    #[error("failed to {stage} output image: {source}")]
    Encoding {
        /// Step that failed
        stage: &'static str,
        /// Underlying image error
        #[source]
        source: image::ImageError,
    },
    /// The payload could not be formatted or encoded
    #[error("payload rejected: {0}")]
    Payload(String),
}

/// Non-fatal conditions reported alongside a finished render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// The logo could not be read; the image was rendered without it
    LogoUnavailable {
        /// Path the caller supplied
        path: PathBuf,
        /// Why it could not be used
        reason: String,
    },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::LogoUnavailable { path, reason } => {
                write!(f, "logo {} unavailable: {}", path.display(), reason)
            }
        }
    }
}
