//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the marquee crate.
#[derive(Debug)]
pub enum MarqueeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Typeface font file parsing failure.
    FontParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Matcap image decoding failure.
    TextureDecode(image::ImageError),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for MarqueeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::FontParse(msg) => write!(f, "font parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TextureDecode(e) => {
                write!(f, "texture decode error: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for MarqueeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::TextureDecode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for MarqueeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for MarqueeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for MarqueeError {
    fn from(e: image::ImageError) -> Self {
        Self::TextureDecode(e)
    }
}
