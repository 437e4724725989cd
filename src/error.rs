//! Error types for the PDF encoder.
//!
//! This module defines all error types that can occur while building a
//! document. An absent image reference or an unavailable rasterization
//! surface is not an error (the build proceeds without the image); content
//! overflow is not an error either (excess lines are dropped). Everything
//! else fails the build and bubbles unmodified to the caller.

/// Result type alias for encoder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while encoding a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Raster load, decode, or re-encode failure
    #[error("Image error: {0}")]
    Image(String),

    /// An object update targeted an id that was never allocated
    #[error("Object not found: {0} 0 R")]
    ObjectNotFound(u32),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
